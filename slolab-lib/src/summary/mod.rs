//! The summary artifact and its persistence
//!
//! A [`Summary`] is the stable contract consumed by downstream CI analysis. Every measurement
//! method converges on this one schema, so analysis tools never need to know how the samples were
//! obtained.
//!
//! [`JsonFileWriter`] persists a summary crash-safely: the JSON is written to a temp file in the
//! destination's directory, synced, and renamed over the destination. A reader of the destination
//! path sees either the previous content or the complete new content, never a partial file.

mod schema;
mod writer;

pub use schema::{RunConfig, RunLocation, RunMode, RunTrigger, SCHEMA_VERSION, SliResult, Status, Summary};
pub use writer::{JsonFileWriter, SUMMARY_FILE_MODE, SummaryWriter};
