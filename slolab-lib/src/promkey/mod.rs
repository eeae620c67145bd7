//! Canonical Prometheus-style metric keys
//!
//! Snapshots are looked up by exact string equality, so every metric token must be reduced to a
//! single canonical spelling before it is used as a key. This module parses tokens of the form
//! `name` or `name{label="value",...}` and formats them back with label keys sorted and values
//! escaped.
//!
//! The escape set is the one used by the Prometheus text format: backslash, double quote,
//! newline, tab and carriage return. [`escape_label_value`] and [`unescape_label_value`] are exact
//! inverses for every string.

mod codec;
mod escape;

pub use codec::{Labels, canonicalize, format, parse};
pub use escape::{escape_label_value, unescape_label_value};
