#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for slolab
//!
//! slolab judges an operational window of a system under test against declared
//! service-level indicators. Two metric snapshots bound the window; every indicator is
//! computed from them, checked against its judge rules, and the outcome is persisted as a
//! versioned JSON summary for downstream CI analysis.
//!
//! # Module Organization
//!
//! - [`promkey`]: Canonical metric keys (name plus sorted, escaped labels)
//! - [`exposition`]: Parser for the plaintext `key value` exposition format
//! - [`sli`]: Indicator declarations, judge rules, and the registry
//! - [`fetch`]: The snapshot capability and its file and in-memory implementations
//! - [`engine`]: Evaluation of one window into a summary
//! - [`summary`]: The summary schema and its crash-safe writer
//! - [`session`]: Measurement windows around test cases
//! - [`presets`]: Built-in indicator sets
//! - [`tags`]: Automatic and user summary tags
//! - [`reports`]: Console rendering of a summary
//! - [`commands`]: Command-line interface

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod engine;
pub mod exposition;
pub mod fetch;
pub mod presets;
pub mod promkey;
pub mod reports;
pub mod session;
pub mod sli;
pub mod summary;
pub mod tags;

pub use crate::commands::{Host, run};
