use crate::Result;
use crate::presets;
use crate::sli::{Registry, SliSpec};
use crate::summary::SCHEMA_VERSION;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Configuration file looked up in the current directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "slolab.toml";

const LOG_TARGET: &str = "    config";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Names of built-in indicator sets to evaluate
    #[serde(default)]
    pub presets: Vec<String>,

    /// Indicators evaluated in addition to the presets
    #[serde(default)]
    pub indicators: Vec<SliSpec>,

    /// Tags added to every summary
    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    /// Upper bound on fetching both snapshots of a window
    #[serde(default = "default_fetch_timeout", with = "humantime_serde")]
    pub fetch_timeout: Duration,

    /// Schema version written into every summary
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
}

const fn default_fetch_timeout() -> Duration {
    Duration::from_secs(120)
}

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            presets: vec![presets::Preset::Baseline.to_string()],
            indicators: Vec::new(),
            tags: BTreeMap::new(),
            fetch_timeout: default_fetch_timeout(),
            schema_version: default_schema_version(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `slolab.toml` in the current directory is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(config_path: Option<&Utf8Path>) -> Result<Self> {
        Self::load_from(config_path, Utf8Path::new("")).map(|(config, _)| config)
    }

    /// Load configuration, looking for the default file in `dir` when no path is given
    ///
    /// Also returns the path of the file that was read, `None` when the built-in defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load_from(config_path: Option<&Utf8Path>, dir: &Utf8Path) -> Result<(Self, Option<Utf8PathBuf>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading slolab configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path = dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!(target: LOG_TARGET, "No '{path}' found, using default configuration");
                    return Ok((Self::default(), None));
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading slolab configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate().into_app_err_with(|| format!("validating configuration file '{final_path}'"))?;

        Ok((config, Some(final_path)))
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file already exists or cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        if output_path.exists() {
            bail!("'{output_path}' already exists");
        }

        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values, including that the indicator ids are unique
    ///
    /// # Errors
    ///
    /// Returns an error describing the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.schema_version.trim().is_empty() {
            bail!("schema_version must not be empty");
        }

        if self.fetch_timeout.is_zero() {
            bail!("fetch_timeout must be greater than zero");
        }

        let _ = self.specs()?;
        Ok(())
    }

    /// The indicators to evaluate: every preset's indicators followed by the inline ones
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown preset name or a duplicate indicator id
    pub fn specs(&self) -> Result<Vec<SliSpec>> {
        let mut reg = Registry::new();

        for name in &self.presets {
            let preset = presets::by_name(name).ok_or_else(|| {
                app_err!(
                    "unknown preset '{name}', expected one of: {}",
                    presets::names().collect::<Vec<_>>().join(", ")
                )
            })?;

            for spec in preset.specs() {
                reg.register(spec).into_app_err_with(|| format!("registering preset '{name}'"))?;
            }
        }

        for spec in &self.indicators {
            reg.register(spec.clone()).into_app_err("registering inline indicators")?;
        }

        Ok(reg.into_specs())
    }
}
