use crate::Result;
use crate::engine::ExecContext;
use chrono::{DateTime, Utc};
use core::future::Future;
use std::collections::HashMap;

/// One snapshot of metric values at a point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    pub at: DateTime<Utc>,

    /// Canonical metric key to value.
    pub values: HashMap<String, f64>,
}

impl Sample {
    #[must_use]
    pub const fn new(at: DateTime<Utc>, values: HashMap<String, f64>) -> Self {
        Self { at, values }
    }
}

/// Capability to obtain one snapshot of metrics.
///
/// Implementations decide how the snapshot is obtained. Calls must be independent of each
/// other; the engine never issues two calls at once for the same run.
pub trait MetricsFetcher: Send + Sync {
    fn fetch(&self, ctx: &ExecContext, at: DateTime<Utc>) -> impl Future<Output = Result<Sample>> + Send;
}
