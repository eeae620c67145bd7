use super::{MetricsFetcher, Sample};
use crate::Result;
use crate::engine::ExecContext;
use chrono::{DateTime, Utc};
use ohno::app_err;
use std::collections::HashMap;

/// Serves pre-built samples keyed by their exact timestamp.
///
/// Useful when the caller already holds the values, for example an in-process scrape.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    samples: HashMap<DateTime<Utc>, HashMap<String, f64>>,
}

impl MemoryFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sample<K: Into<String>>(mut self, at: DateTime<Utc>, values: impl IntoIterator<Item = (K, f64)>) -> Self {
        let _ = self.samples.insert(at, values.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }
}

impl MetricsFetcher for MemoryFetcher {
    async fn fetch(&self, _ctx: &ExecContext, at: DateTime<Utc>) -> Result<Sample> {
        self.samples
            .get(&at)
            .map(|values| Sample::new(at, values.clone()))
            .ok_or_else(|| app_err!("no sample recorded for {}", at.to_rfc3339()))
    }
}
