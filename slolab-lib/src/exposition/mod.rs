//! Flat parser for the Prometheus text exposition format
//!
//! Only the `key value` lines are of interest. Comments (`# HELP`, `# TYPE`) and blank lines are
//! skipped, and so are lines that do not carry at least two fields. Keys are returned exactly as
//! they appear in the text; use [`crate::promkey::canonicalize`] to normalize them.

mod parser;

pub use parser::{parse_entries, parse_reader, parse_str};
