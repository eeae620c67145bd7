use super::naming::{next_summary_path, summary_file_name};
use crate::Result;
use crate::engine::{Engine, ExecContext, ExecuteRequest, MeasurementMethod, MetricsSink, apply_v4};
use crate::fetch::MetricsFetcher;
use crate::presets;
use crate::sli::SliSpec;
use crate::summary::{JsonFileWriter, RunConfig, Summary, SummaryWriter};
use crate::tags::{self, AutoTagInput};
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

const LOG_TARGET: &str = "   session";

/// Inputs of a [`Session`].
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub suite: String,
    pub test_case: String,
    pub namespace: String,

    /// Run identifier, generated from the current time when blank.
    pub run_id: String,

    /// Directory receiving one summary file per test case. Without it no summary is written
    /// unless `summary_path` is set.
    pub artifacts_dir: Option<Utf8PathBuf>,

    /// Exact summary path, taking precedence over `artifacts_dir`.
    pub summary_path: Option<Utf8PathBuf>,

    /// User tags, layered over the automatic tags.
    pub tags: BTreeMap<String, String>,

    pub method: MeasurementMethod,

    /// Indicators to evaluate, the baseline preset when `None`.
    pub specs: Option<Vec<SliSpec>>,

    pub evidence_paths: BTreeMap<String, String>,
}

/// One measurement window around a test case.
///
/// Call [`Session::start`] when the window opens and [`Session::end`] when it closes. Closing the
/// window fetches both snapshots, evaluates every indicator, and writes the summary.
pub struct Session<F, W = JsonFileWriter> {
    config: SessionConfig,
    run_id: String,
    tags: BTreeMap<String, String>,
    specs: Vec<SliSpec>,
    engine: Engine<F, W>,
    started_at: Option<DateTime<Utc>>,
}

impl<F, W> core::fmt::Debug for Session<F, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("run_id", &self.run_id)
            .field("started_at", &self.started_at)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl<F: MetricsFetcher> Session<F> {
    #[must_use]
    pub fn new(config: SessionConfig, fetcher: F) -> Self {
        Self::with_writer(config, fetcher, JsonFileWriter::new(), Utc::now())
    }
}

impl<F: MetricsFetcher, W: SummaryWriter> Session<F, W> {
    /// Build a session with an explicit writer and the time used to generate a missing run id.
    #[must_use]
    pub fn with_writer(mut config: SessionConfig, fetcher: F, writer: W, now: DateTime<Utc>) -> Self {
        let run_id = match config.run_id.trim() {
            "" => format!("local-{}", now.timestamp()),
            id => id.to_string(),
        };

        let auto = tags::auto_tags(AutoTagInput {
            suite: &config.suite,
            test_case: &config.test_case,
            namespace: &config.namespace,
            run_id: &run_id,
        });
        let tags = tags::merge(&config.tags, &auto);
        let specs = config.specs.take().unwrap_or_else(presets::default_specs);

        Self {
            config,
            run_id,
            tags,
            specs,
            engine: Engine::new(fetcher, writer),
            started_at: None,
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.engine = self.engine.with_sink(sink);
        self
    }

    #[must_use]
    pub fn with_schema_version(mut self, version: impl Into<String>) -> Self {
        self.engine = self.engine.with_schema_version(version);
        self
    }

    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    #[must_use]
    pub const fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    #[must_use]
    pub fn specs(&self) -> &[SliSpec] {
        &self.specs
    }

    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Whether closing the window writes a summary file.
    #[must_use]
    pub const fn should_write_artifacts(&self) -> bool {
        self.config.summary_path.is_some() || self.config.artifacts_dir.is_some()
    }

    /// The path the summary will be written to, `None` when no artifacts are written.
    pub fn summary_path(&self) -> Result<Option<Utf8PathBuf>> {
        if let Some(path) = &self.config.summary_path {
            return Ok(Some(path.clone()));
        }

        let Some(dir) = &self.config.artifacts_dir else {
            return Ok(None);
        };

        next_summary_path(dir, &summary_file_name(&self.run_id, &self.config.test_case)).map(Some)
    }

    /// Open the window now.
    pub fn start(&mut self) {
        self.start_at(Utc::now());
    }

    /// Open the window at `at`.
    pub fn start_at(&mut self, at: DateTime<Utc>) {
        log::debug!(target: LOG_TARGET, "Run '{}' window opened at {}", self.run_id, at.to_rfc3339());
        self.started_at = Some(at);
    }

    /// Close the window now and evaluate it.
    pub async fn end(&self, ctx: &ExecContext) -> Result<Summary> {
        self.end_at(ctx, Utc::now()).await
    }

    /// Close the window at `at` and evaluate it.
    ///
    /// Fails if the window was never opened.
    pub async fn end_at(&self, ctx: &ExecContext, at: DateTime<Utc>) -> Result<Summary> {
        log::debug!(target: LOG_TARGET, "Run '{}' window closed at {}", self.run_id, at.to_rfc3339());

        let mut config = RunConfig {
            run_id: self.run_id.clone(),
            started_at: self.started_at,
            finished_at: Some(at),
            tags: self.tags.clone(),
            evidence_paths: self.config.evidence_paths.clone(),
            ..RunConfig::default()
        };
        apply_v4(&mut config, self.config.method);

        let out_path = self.summary_path()?;
        self.engine
            .execute(
                ctx,
                ExecuteRequest {
                    config,
                    specs: self.specs.clone(),
                    out_path,
                },
            )
            .await
    }
}
