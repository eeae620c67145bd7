//! Command-line interface for slolab
//!
//! This module implements the CLI commands on top of the library: argument parsing,
//! configuration management, and printing results.
//!
//! ## Commands
//!
//! - **evaluate**: Evaluate a window bounded by two exposition-format snapshot files,
//!   write the JSON summary, and print a console report
//! - **presets**: List the built-in indicator presets and their indicators
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file, including that indicator ids are unique
//!
//! Configuration is a TOML file naming presets, inline indicators, summary tags, the
//! fetch timeout, and the schema version.
//!
//! All output goes through [`Host`] so commands can be exercised in memory.

mod common;
mod config;
mod evaluate;
mod host;
mod init;
mod run;
mod show_presets;
mod validate;

pub use common::{ColorMode, LogLevel};
pub use config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TOML};
pub use evaluate::{EvaluateArgs, evaluate};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use show_presets::{PresetsArgs, show_presets};
pub use validate::{ValidateArgs, validate_config};
