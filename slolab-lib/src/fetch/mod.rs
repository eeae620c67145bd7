//! Metric snapshot acquisition
//!
//! The engine only sees the [`MetricsFetcher`] capability: given a point in time it returns a
//! [`Sample`] of canonical metric keys to values. How the snapshot is physically obtained is up to
//! the implementation. Two are provided:
//!
//! - [`FileFetcher`] reads exposition-format snapshot files captured ahead of time
//! - [`MemoryFetcher`] serves values the caller already holds
//!
//! [`values_from_exposition`] turns raw exposition text into sample values, canonicalizing keys
//! and adding name-only totals.

mod fetcher;
mod file_fetcher;
mod memory_fetcher;
mod values;

pub use fetcher::{MetricsFetcher, Sample};
pub use file_fetcher::FileFetcher;
pub use memory_fetcher::MemoryFetcher;
pub use values::values_from_exposition;
