use super::evaluate::{evaluate_sli, ignored_rules};
use super::sink::{FetchPhase, MetricsSink, NullMetricsSink};
use super::ExecContext;
use crate::Result;
use crate::fetch::{MetricsFetcher, Sample};
use crate::sli::SliSpec;
use crate::summary::{RunConfig, SCHEMA_VERSION, SliResult, Summary, SummaryWriter};
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use ohno::bail;
use std::sync::Arc;

const LOG_TARGET: &str = "    engine";

/// Input to one [`Engine::execute`] call.
#[derive(Debug, Clone)]
pub struct ExecuteRequest {
    pub config: RunConfig,
    pub specs: Vec<SliSpec>,

    /// Where to persist the summary, `None` to skip persistence.
    pub out_path: Option<Utf8PathBuf>,
}

/// Evaluates indicators over one measurement window.
///
/// Each engine owns its fetcher; runs that execute concurrently need separate engines.
pub struct Engine<F, W> {
    fetcher: F,
    writer: W,
    sink: Arc<dyn MetricsSink>,
    schema_version: String,
}

impl<F, W> core::fmt::Debug for Engine<F, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("schema_version", &self.schema_version)
            .finish_non_exhaustive()
    }
}

impl<F: MetricsFetcher, W: SummaryWriter> Engine<F, W> {
    #[must_use]
    pub fn new(fetcher: F, writer: W) -> Self {
        Self {
            fetcher,
            writer,
            sink: Arc::new(NullMetricsSink),
            schema_version: SCHEMA_VERSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub fn with_schema_version(mut self, version: impl Into<String>) -> Self {
        self.schema_version = version.into();
        self
    }

    #[must_use]
    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Fetch both snapshots, evaluate every indicator, and persist the summary.
    ///
    /// Only a request without both window timestamps, or a failure to persist a fully evaluated
    /// summary, is an error. A failed fetch yields a summary with no results and a warning.
    pub async fn execute(&self, ctx: &ExecContext, req: ExecuteRequest) -> Result<Summary> {
        let (Some(started_at), Some(finished_at)) = (req.config.started_at, req.config.finished_at) else {
            bail!("run config must carry both startedAt and finishedAt");
        };

        let run_id = req.config.run_id.clone();

        let start = match self.fetch(ctx, FetchPhase::Start, started_at, &run_id).await {
            Ok(sample) => sample,
            Err(warning) => return Ok(self.degraded(req, warning)),
        };

        let end = match self.fetch(ctx, FetchPhase::End, finished_at, &run_id).await {
            Ok(sample) => sample,
            Err(warning) => return Ok(self.degraded(req, warning)),
        };

        let mut warnings = Vec::new();
        let mut results = Vec::with_capacity(req.specs.len());
        for spec in &req.specs {
            warnings.extend(ignored_rules(spec));

            let result = evaluate_sli(spec, &start, &end);
            log::debug!(target: LOG_TARGET, "Indicator '{}' evaluated to {}", result.id, result.status);
            self.sink.record_result(&run_id, &result);
            results.push(result);
        }

        let summary = self.summary(req.config, results, warnings);
        self.writer.write(req.out_path.as_deref(), &summary)?;
        Ok(summary)
    }

    /// Fetch one snapshot, turning a failure into the warning text recorded in the summary.
    async fn fetch(&self, ctx: &ExecContext, phase: FetchPhase, at: DateTime<Utc>, run_id: &str) -> Result<Sample, String> {
        log::debug!(target: LOG_TARGET, "Fetching {phase} snapshot at {}", at.to_rfc3339());

        match ctx.run(self.fetcher.fetch(ctx, at)).await.and_then(|r| r) {
            Ok(sample) => {
                log::debug!(target: LOG_TARGET, "Fetched {phase} snapshot with {} series", sample.values.len());
                Ok(sample)
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Could not fetch {phase} snapshot: {e}");
                self.sink.record_fetch_failure(run_id, phase);
                Err(format!("fetch({phase}) failed: {e}"))
            }
        }
    }

    /// Build and persist the summary of a run whose measurement failed.
    ///
    /// Persistence is best effort here: the summary is returned even if it could not be written.
    fn degraded(&self, req: ExecuteRequest, warning: String) -> Summary {
        let summary = self.summary(req.config, Vec::new(), vec![warning]);
        if let Err(e) = self.writer.write(req.out_path.as_deref(), &summary) {
            log::warn!(target: LOG_TARGET, "Could not persist degraded summary: {e}");
        }
        summary
    }

    fn summary(&self, config: RunConfig, results: Vec<SliResult>, warnings: Vec<String>) -> Summary {
        Summary {
            schema_version: self.schema_version.clone(),
            generated_at: Utc::now(),
            config,
            results,
            warnings,
        }
    }
}
