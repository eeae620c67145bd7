use super::{MetricsFetcher, Sample, values_from_exposition};
use crate::Result;
use crate::engine::ExecContext;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use ohno::{IntoAppError, bail};

const LOG_TARGET: &str = "     fetch";

/// Serves samples from exposition-format snapshot files.
///
/// Each snapshot file is registered with the time it was captured. A fetch for time `at` reads the
/// latest snapshot captured at or before `at`.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    snapshots: Vec<(DateTime<Utc>, Utf8PathBuf)>,
}

impl FileFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_snapshot(mut self, captured_at: DateTime<Utc>, path: impl Into<Utf8PathBuf>) -> Self {
        self.add_snapshot(captured_at, path);
        self
    }

    pub fn add_snapshot(&mut self, captured_at: DateTime<Utc>, path: impl Into<Utf8PathBuf>) {
        self.snapshots.push((captured_at, path.into()));
        self.snapshots.sort_by_key(|(ts, _)| *ts);
    }

    fn snapshot_for(&self, at: DateTime<Utc>) -> Option<&Utf8Path> {
        self.snapshots
            .iter()
            .rev()
            .find(|(ts, _)| *ts <= at)
            .map(|(_, path)| path.as_path())
    }
}

impl MetricsFetcher for FileFetcher {
    async fn fetch(&self, ctx: &ExecContext, at: DateTime<Utc>) -> Result<Sample> {
        let Some(path) = self.snapshot_for(at) else {
            bail!("no snapshot captured at or before {}", at.to_rfc3339());
        };

        log::debug!(target: LOG_TARGET, "Reading snapshot '{path}' for {}", at.to_rfc3339());

        let text = ctx
            .run(tokio::fs::read_to_string(path))
            .await?
            .into_app_err_with(|| format!("unable to read snapshot '{path}'"))?;

        let values = values_from_exposition(&text).into_app_err_with(|| format!("unable to parse snapshot '{path}'"))?;

        log::debug!(target: LOG_TARGET, "Loaded {} series from '{path}'", values.len());

        Ok(Sample::new(at, values))
    }
}
