use super::{escape_label_value, unescape_label_value};
use crate::Result;
use ohno::{IntoAppError, bail};
use std::collections::HashMap;

/// Label name to label value mapping of a single series.
pub type Labels = HashMap<String, String>;

/// Parse a metric token such as `name` or `name{a="b",c="d"}` into its name and labels.
///
/// Surrounding whitespace is ignored. Label pairs may be separated by commas and/or spaces.
pub fn parse(token: &str) -> Result<(String, Labels)> {
    let token = token.trim();
    if token.is_empty() {
        bail!("empty metric token");
    }

    let Some((name, rest)) = token.split_once('{') else {
        return Ok((token.to_string(), Labels::new()));
    };

    let Some(inside) = rest.strip_suffix('}') else {
        bail!("invalid metric token (missing '}}'): {token:?}");
    };

    let labels = parse_labels(inside)?;
    Ok((name.to_string(), labels))
}

/// Format a name and labels into the canonical key string.
///
/// Label keys are sorted so that the output does not depend on the iteration order of `labels`.
#[must_use]
pub fn format(name: &str, labels: &Labels) -> String {
    if labels.is_empty() {
        return name.to_string();
    }

    let mut keys: Vec<&String> = labels.keys().collect();
    keys.sort_unstable();

    let mut out = String::with_capacity(name.len() + labels.len() * 16);
    out.push_str(name);
    out.push('{');
    for (i, key) in keys.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_label_value(&labels[key]));
        out.push('"');
    }
    out.push('}');
    out
}

/// Convert a raw token into its canonical key string.
pub fn canonicalize(token: &str) -> Result<String> {
    let (name, labels) = parse(token)?;
    Ok(format(&name, &labels))
}

fn parse_labels(s: &str) -> Result<Labels> {
    let mut labels = Labels::new();
    let mut chars = s.chars().peekable();

    loop {
        while chars.next_if(|&c| c == ' ' || c == ',').is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        loop {
            match chars.next() {
                Some('=') => break,
                Some(c) => key.push(c),
                None => bail!("invalid labels (missing '='): {s:?}"),
            }
        }
        let key = key.trim().to_string();

        while chars.next_if_eq(&' ').is_some() {}
        if chars.next_if_eq(&'"').is_none() {
            bail!("invalid labels (missing '\"' for {key:?}): {s:?}");
        }

        // Collect the raw value, escapes included, up to the closing quote.
        let mut raw = String::new();
        loop {
            match chars.next() {
                Some('"') => break,
                Some('\\') => {
                    let Some(escaped) = chars.next() else {
                        bail!("invalid escape at end of value for {key:?}: {s:?}");
                    };
                    raw.push('\\');
                    raw.push(escaped);
                }
                Some(c) => raw.push(c),
                None => bail!("invalid labels (unterminated value for {key:?}): {s:?}"),
            }
        }

        let value = unescape_label_value(&raw).into_app_err_with(|| format!("unescaping label {key:?}"))?;
        let _ = labels.insert(key, value);
    }

    Ok(labels)
}
