//! Indicator evaluation over one measurement window
//!
//! [`Engine::execute`] fetches a start and an end snapshot, strictly one after the other, evaluates
//! every indicator against them, and persists the resulting [`Summary`](crate::summary::Summary).
//!
//! A measurement failure is not a test failure: when either fetch fails, including when the
//! [`ExecContext`] deadline fires, the engine still returns a schema-valid summary with no results
//! and a warning describing the failure.
//!
//! Evaluation of a single indicator:
//!
//! - inputs are summed on both sides, an input missing on either side skips the indicator
//! - the value is the start sum, the end sum, or their difference depending on the compute mode
//! - a negative delta warns about a suspected counter reset and bypasses the judge rules
//! - otherwise the judge rules decide; see [`judge`]

mod context;
mod defaults;
mod evaluate;
mod executor;
mod sink;

pub use context::ExecContext;
pub use defaults::{FORMAT_V4, MeasurementMethod, apply_v4};
pub use evaluate::{REASON_MISSING_INPUTS, REASON_NEGATIVE_DELTA, REASON_UNKNOWN_MODE, evaluate_sli, ignored_rules, judge};
pub use executor::{Engine, ExecuteRequest};
pub use sink::{FetchPhase, MemoryMetricsSink, MetricsSink, NullMetricsSink, SinkEvent};
