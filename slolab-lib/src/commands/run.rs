//! Command dispatch logic for slolab

use super::{EvaluateArgs, InitArgs, PresetsArgs, ValidateArgs, evaluate, init_config, show_presets, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "slolab", version, author, long_about = None)]
#[command(about = "Judge an operational window against declared service-level indicators")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: SlolabSubcommand,
}

#[derive(Subcommand, Debug)]
enum SlolabSubcommand {
    /// Evaluate a window bounded by two metrics snapshots
    Evaluate(Box<EvaluateArgs>),
    /// List the built-in indicator presets
    Presets(PresetsArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        SlolabSubcommand::Evaluate(evaluate_args) => evaluate(host, evaluate_args).await,
        SlolabSubcommand::Presets(presets_args) => show_presets(host, presets_args),
        SlolabSubcommand::Init(init_args) => init_config(host, init_args),
        SlolabSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
