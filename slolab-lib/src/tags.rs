//! Summary tags
//!
//! Every summary carries a flat tag map. A set of tags is derived automatically from the run
//! context; tags given by the user are layered on top and win on conflicts.

use std::collections::BTreeMap;

/// Context from which automatic tags are derived.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoTagInput<'a> {
    pub suite: &'a str,
    pub test_case: &'a str,
    pub namespace: &'a str,
    pub run_id: &'a str,
}

/// The automatic tags of a run. Empty values are kept here and dropped by [`merge`].
#[must_use]
pub fn auto_tags(input: AutoTagInput<'_>) -> BTreeMap<String, String> {
    [
        ("suite", input.suite),
        ("test_case", input.test_case),
        ("namespace", input.namespace),
        ("run_id", input.run_id),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Merge user tags over automatic tags.
#[must_use]
pub fn merge(user: &BTreeMap<String, String>, auto: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut merged: BTreeMap<String, String> = auto.iter().filter(|(_, v)| !v.is_empty()).map(|(k, v)| (k.clone(), v.clone())).collect();
    merged.extend(user.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Parse a `KEY=VALUE` tag argument.
pub fn parse_tag(s: &str) -> crate::Result<(String, String)> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.to_string())),
        _ => Err(ohno::app_err!("invalid tag {s:?}, expected KEY=VALUE")),
    }
}
