//! Measurement windows around test cases
//!
//! A [`Session`] ties the pieces together for one test case: it derives the run id and tags,
//! records when the window opens and closes, picks a collision-free summary path, and runs the
//! engine with the v4 defaults applied.

mod naming;
mod window;

pub use naming::{next_summary_path, sanitize_filename, summary_file_name};
pub use window::{Session, SessionConfig};
