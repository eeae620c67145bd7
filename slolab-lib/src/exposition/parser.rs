use crate::Result;
use ohno::{IntoAppError, app_err};
use std::collections::HashMap;
use std::io::BufRead;

/// Parse exposition text into a `key → value` map.
///
/// A later line with the same key overwrites an earlier one.
pub fn parse_str(text: &str) -> Result<HashMap<String, f64>> {
    Ok(parse_entries(text)?.into_iter().collect())
}

/// Parse exposition text into `(key, value)` pairs in the order the lines appear.
///
/// Duplicate keys are kept, so callers that merge keys after normalizing them can still apply
/// a last-line-wins rule.
pub fn parse_entries(text: &str) -> Result<Vec<(String, f64)>> {
    let mut out = Vec::new();
    for line in text.lines() {
        if let Some(entry) = parse_line(line)? {
            out.push(entry);
        }
    }
    Ok(out)
}

/// Parse exposition text from a reader into a `key → value` map.
pub fn parse_reader(reader: impl BufRead) -> Result<HashMap<String, f64>> {
    let mut out = HashMap::new();
    for line in reader.lines() {
        let line = line.into_app_err("reading exposition text")?;
        if let Some((key, value)) = parse_line(&line)? {
            let _ = out.insert(key, value);
        }
    }
    Ok(out)
}

fn parse_line(line: &str) -> Result<Option<(String, f64)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let (Some(key), Some(value)) = (fields.next(), fields.next()) else {
        return Ok(None);
    };

    let value: f64 = value
        .parse()
        .map_err(|e| app_err!("could not parse value of exposition line {line:?}: {e}"))?;

    Ok(Some((key.to_string(), value)))
}
