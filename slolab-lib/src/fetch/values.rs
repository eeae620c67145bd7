use crate::Result;
use crate::{exposition, promkey};
use ohno::IntoAppError;
use std::collections::HashMap;

/// Build sample values from exposition text.
///
/// Every key is canonicalized. Lines are applied in text order, so when two lines spell the same
/// series differently the later one wins. In addition, each metric name that only appears with
/// labels gets a name-only entry holding the sum over all of its distinct label sets, so that a
/// bare name can be used as an input meaning "all series". An unlabeled series already present in
/// the text is kept as-is.
pub fn values_from_exposition(text: &str) -> Result<HashMap<String, f64>> {
    let entries = exposition::parse_entries(text)?;

    // canonical key -> (metric name, labeled, value)
    let mut series: HashMap<String, (String, bool, f64)> = HashMap::with_capacity(entries.len());
    for (token, value) in entries {
        let (name, labels) = promkey::parse(&token).into_app_err_with(|| format!("invalid metric key {token:?}"))?;
        let key = promkey::format(&name, &labels);
        let _ = series.insert(key, (name, !labels.is_empty(), value));
    }

    let mut totals: HashMap<String, f64> = HashMap::new();
    for (name, labeled, value) in series.values() {
        if *labeled {
            *totals.entry(name.clone()).or_default() += value;
        }
    }

    let mut values: HashMap<String, f64> = series.into_iter().map(|(key, (_, _, value))| (key, value)).collect();
    for (name, total) in totals {
        let _ = values.entry(name).or_insert(total);
    }

    Ok(values)
}
