use super::Host;
use super::common::{ColorMode, LogLevel, init_logging};
use super::config::Config;
use crate::Result;
use crate::engine::{ExecContext, MeasurementMethod};
use crate::fetch::FileFetcher;
use crate::reports::generate_console;
use crate::session::{Session, SessionConfig};
use crate::tags;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "  evaluate";

#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// Metrics snapshot captured when the window opened
    #[arg(long, value_name = "FILE")]
    pub start: Utf8PathBuf,

    /// Metrics snapshot captured when the window closed
    #[arg(long, value_name = "FILE")]
    pub end: Utf8PathBuf,

    /// When the window opened (default is the start snapshot's modification time)
    #[arg(long, value_name = "RFC3339")]
    pub started_at: Option<DateTime<Utc>>,

    /// When the window closed (default is the end snapshot's modification time)
    #[arg(long, value_name = "RFC3339")]
    pub finished_at: Option<DateTime<Utc>>,

    /// Path to configuration file (default is `slolab.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Evaluate this preset in addition to the configured ones
    #[arg(long = "preset", value_name = "NAME")]
    pub presets: Vec<String>,

    /// Write the summary to this file
    #[arg(long, value_name = "PATH", conflicts_with = "artifacts_dir", help_heading = "Summary Output")]
    pub out: Option<Utf8PathBuf>,

    /// Write the summary into this directory under a name derived from the run id and test case
    #[arg(long, value_name = "DIR", help_heading = "Summary Output")]
    pub artifacts_dir: Option<Utf8PathBuf>,

    /// Run identifier (default is `local-<unix seconds>`)
    #[arg(long, value_name = "ID", env = "SLOLAB_RUN_ID")]
    pub run_id: Option<String>,

    /// Name of the test case the window belongs to
    #[arg(long, value_name = "NAME", default_value = "")]
    pub test_case: String,

    /// Name of the suite the test case belongs to
    #[arg(long, value_name = "NAME", default_value = "")]
    pub suite: String,

    /// Namespace of the system under test
    #[arg(long, value_name = "NAME", default_value = "")]
    pub namespace: String,

    /// Extra summary tag, may be repeated
    #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag_arg)]
    pub tags: Vec<(String, String)>,

    /// How the snapshots were captured
    #[arg(long, value_name = "METHOD", default_value = "inside-snapshot")]
    pub method: MeasurementMethod,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Exit with status code 1 if any indicator fails its judge rules
    #[arg(long)]
    pub error_if_fail: bool,
}

fn parse_tag_arg(s: &str) -> Result<(String, String), String> {
    tags::parse_tag(s).map_err(|e| e.to_string())
}

/// Evaluate a window bounded by two snapshot files and print the outcome.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the window is empty, or a fully evaluated
/// summary cannot be written. Unreadable snapshots are reported as warnings in the summary.
pub async fn evaluate<H: Host>(host: &mut H, args: &EvaluateArgs) -> Result<()> {
    init_logging(args.log_level);

    let mut config = Config::load(args.config.as_deref())?;
    config.presets.extend(args.presets.iter().cloned());
    let specs = config.specs()?;

    let started_at = match args.started_at {
        Some(at) => at,
        None => modified_at(&args.start)?,
    };
    let finished_at = match args.finished_at {
        Some(at) => at,
        None => modified_at(&args.end)?,
    };
    if finished_at <= started_at {
        bail!(
            "window must close after it opens, got {} .. {}",
            started_at.to_rfc3339(),
            finished_at.to_rfc3339()
        );
    }

    let mut user_tags = config.tags.clone();
    user_tags.extend(args.tags.iter().cloned());

    let evidence_paths = BTreeMap::from([
        ("startSnapshot".to_string(), args.start.to_string()),
        ("endSnapshot".to_string(), args.end.to_string()),
    ]);

    let fetcher = FileFetcher::new()
        .with_snapshot(started_at, args.start.clone())
        .with_snapshot(finished_at, args.end.clone());

    let session_config = SessionConfig {
        suite: args.suite.clone(),
        test_case: args.test_case.clone(),
        namespace: args.namespace.clone(),
        run_id: args.run_id.clone().unwrap_or_default(),
        artifacts_dir: args.artifacts_dir.clone(),
        summary_path: args.out.clone(),
        tags: user_tags,
        method: args.method,
        specs: Some(specs),
        evidence_paths,
    };

    let mut session = Session::new(session_config, fetcher).with_schema_version(config.schema_version.clone());
    log::info!(target: LOG_TARGET, "Evaluating {} indicators for run '{}'", session.specs().len(), session.run_id());

    session.start_at(started_at);
    let ctx = ExecContext::with_timeout(config.fetch_timeout);
    let summary = session.end_at(&ctx, finished_at).await?;

    let mut report = String::new();
    generate_console(&summary, args.color.use_colors(), &mut report)?;
    let _ = write!(host.output(), "{report}");

    if args.error_if_fail && summary.has_failures() {
        host.exit(1);
    }

    Ok(())
}

fn modified_at(path: &Utf8Path) -> Result<DateTime<Utc>> {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .into_app_err_with(|| format!("unable to read modification time of '{path}'"))?;
    Ok(modified.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::summary::{Status, Summary};

    #[derive(Parser, Debug)]
    struct Wrapper {
        #[command(flatten)]
        args: EvaluateArgs,
    }

    fn parse(args: &[&str]) -> EvaluateArgs {
        Wrapper::try_parse_from(core::iter::once("evaluate").chain(args.iter().copied())).unwrap().args
    }

    struct Fixture {
        _tmp: tempfile::TempDir,
        dir: Utf8PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = tempfile::tempdir().unwrap();
            let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

            fs::write(dir.join("start.prom"), "# HELP x test\nx 10\n").unwrap();
            fs::write(dir.join("end.prom"), "x 13\n").unwrap();
            fs::write(
                dir.join("slolab.toml"),
                r#"
presets = []

[[indicators]]
id = "x_delta"
inputs = ["x"]
compute = "delta"

[[indicators.judge]]
op = ">"
target = 2
level = "fail"
"#,
            )
            .unwrap();

            Self { _tmp: tmp, dir }
        }

        fn path(&self, name: &str) -> String {
            self.dir.join(name).to_string()
        }
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_evaluate_writes_summary_and_report() {
        let fx = Fixture::new();
        let out = fx.path("out/summary.json");
        let args = parse(&[
            "--start",
            &fx.path("start.prom"),
            "--end",
            &fx.path("end.prom"),
            "--started-at",
            "2024-01-15T10:00:00Z",
            "--finished-at",
            "2024-01-15T10:05:00Z",
            "--config",
            &fx.path("slolab.toml"),
            "--out",
            &out,
            "--run-id",
            "r1",
            "--tag",
            "team=core",
            "--color",
            "never",
            "--error-if-fail",
        ]);

        let mut host = TestHost::new();
        evaluate(&mut host, &args).await.unwrap();

        assert_eq!(host.exit_code, Some(1));
        let report = host.output_str();
        assert!(report.contains("x_delta"), "{report}");
        assert!(report.contains("rule fail: value > 2"), "{report}");

        let summary: Summary = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(summary.results[0].value, Some(3.0));
        assert_eq!(summary.results[0].status, Status::Fail);
        assert_eq!(summary.config.run_id, "r1");
        assert_eq!(summary.config.format, "v4");
        assert_eq!(summary.config.tags["team"], "core");
        assert_eq!(summary.config.tags["run_id"], "r1");
        assert_eq!(summary.config.evidence_paths["startSnapshot"], fx.path("start.prom"));
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_unreadable_snapshot_is_a_warning() {
        let fx = Fixture::new();
        let args = parse(&[
            "--start",
            &fx.path("start.prom"),
            "--end",
            &fx.path("missing.prom"),
            "--started-at",
            "2024-01-15T10:00:00Z",
            "--finished-at",
            "2024-01-15T10:05:00Z",
            "--config",
            &fx.path("slolab.toml"),
            "--artifacts-dir",
            &fx.path("artifacts"),
            "--run-id",
            "r1",
            "--test-case",
            "scale up",
            "--error-if-fail",
        ]);

        let mut host = TestHost::new();
        evaluate(&mut host, &args).await.unwrap();

        assert_eq!(host.exit_code, None);
        assert!(host.output_str().contains("fetch(end) failed"));

        let path = fx.dir.join("artifacts/sli-summary.v3.r1.scale_up.json");
        let summary: Summary = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert!(summary.results.is_empty());
        assert_eq!(summary.warnings.len(), 1);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_empty_window_rejected() {
        let fx = Fixture::new();
        let args = parse(&[
            "--start",
            &fx.path("start.prom"),
            "--end",
            &fx.path("end.prom"),
            "--started-at",
            "2024-01-15T10:05:00Z",
            "--finished-at",
            "2024-01-15T10:05:00Z",
            "--config",
            &fx.path("slolab.toml"),
        ]);

        let err = evaluate(&mut TestHost::new(), &args).await.unwrap_err();
        assert!(err.to_string().contains("window must close after it opens"));
    }

    #[test]
    fn test_bad_tag_rejected_by_parser() {
        assert!(Wrapper::try_parse_from(["evaluate", "--start", "a", "--end", "b", "--tag", "oops"]).is_err());
    }

    #[test]
    fn test_out_conflicts_with_artifacts_dir() {
        assert!(Wrapper::try_parse_from(["evaluate", "--start", "a", "--end", "b", "--out", "x", "--artifacts-dir", "y"]).is_err());
    }
}
