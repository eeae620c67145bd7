//! Human-readable rendering of summaries
//!
//! The JSON summary is the machine contract; this module only produces the console view printed by
//! the CLI after an evaluation.

mod console;

pub use console::generate as generate_console;
