use super::Host;
use super::config::{Config, DEFAULT_CONFIG_FILE};
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `slolab.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Validates a configuration file by loading it and resolving its indicators
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded, parsed, or names unknown presets or
/// duplicate indicator ids
pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    validate_config_in(host, args, Utf8Path::new(""))
}

/// Like [`validate_config`], looking for the default configuration file in `dir`.
fn validate_config_in<H: Host>(host: &mut H, args: &ValidateArgs, dir: &Utf8Path) -> Result<()> {
    let loaded = Config::load_from(args.config.as_deref(), dir).and_then(|(config, source)| config.specs().map(|specs| (specs, source)));

    match loaded {
        Ok((specs, source)) => {
            let _ = writeln!(host.output(), "Configuration file is valid ({} indicators)", specs.len());
            if let Some(path) = source {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no {DEFAULT_CONFIG_FILE} found)");
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::commands::init::{InitArgs, init_config};

    fn temp_path(tmp: &tempfile::TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::try_from(tmp.path().join(name)).unwrap()
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_default_config_is_valid() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = temp_path(&tmp, "slolab.toml");

        let mut init_host = TestHost::new();
        init_config(
            &mut init_host,
            &InitArgs {
                output: config_path.clone(),
            },
        )
        .unwrap();
        assert!(init_host.output_str().contains("Generated default configuration file"));

        let mut host = TestHost::new();
        validate_config(&mut host, &ValidateArgs { config: Some(config_path) }).unwrap();
        assert!(host.output_str().contains("Configuration file is valid (9 indicators)"));
        assert_eq!(host.exit_code, None);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_duplicate_ids_fail() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = temp_path(&tmp, "dup.toml");
        std::fs::write(
            &config_path,
            r#"
presets = ["baseline"]

[[indicators]]
id = "reconcile_total_delta"
inputs = ["x"]
compute = "delta"
"#,
        )
        .unwrap();

        let mut host = TestHost::new();
        let result = validate_config(&mut host, &ValidateArgs { config: Some(config_path) });

        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
        assert!(host.error_str().contains("Configuration validation failed"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_toml_syntax() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = temp_path(&tmp, "invalid_syntax.toml");
        std::fs::write(&config_path, "[[indicators]\nid = \"x\"\n").unwrap();

        let mut host = TestHost::new();
        assert!(validate_config(&mut host, &ValidateArgs { config: Some(config_path) }).is_err());
        assert_eq!(host.exit_code, Some(1));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_missing_file() {
        let tmp = tempfile::tempdir().unwrap();

        let mut host = TestHost::new();
        let result = validate_config(
            &mut host,
            &ValidateArgs {
                config: Some(temp_path(&tmp, "absent.toml")),
            },
        );
        assert!(result.is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_reports_implicitly_loaded_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        std::fs::write(dir.join(DEFAULT_CONFIG_FILE), "presets = [\"controller-runtime\"]\n").unwrap();

        let mut host = TestHost::new();
        validate_config_in(&mut host, &ValidateArgs { config: None }, &dir).unwrap();

        let output = host.output_str();
        assert!(output.contains("Configuration file is valid (4 indicators)"), "{output}");
        assert!(output.contains(&format!("Config file: {}", dir.join(DEFAULT_CONFIG_FILE))), "{output}");
        assert!(!output.contains("Using default configuration"), "{output}");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_reports_builtin_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let mut host = TestHost::new();
        validate_config_in(&mut host, &ValidateArgs { config: None }, &dir).unwrap();

        let output = host.output_str();
        assert!(output.contains("Configuration file is valid (9 indicators)"), "{output}");
        assert!(output.contains("Using default configuration (no slolab.toml found)"), "{output}");
    }
}
