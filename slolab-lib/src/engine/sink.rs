use crate::summary::{SliResult, Status};
use std::sync::Mutex;
use strum::Display;

/// Which of the two snapshots a fetch was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FetchPhase {
    Start,
    End,
}

/// Receives engine measurements.
///
/// Callers construct a sink and hand it to the engine, the engine keeps no instrument state of its
/// own.
pub trait MetricsSink: Send + Sync {
    /// Called once per evaluated indicator.
    fn record_result(&self, run_id: &str, result: &SliResult);

    /// Called when a snapshot fetch fails.
    fn record_fetch_failure(&self, run_id: &str, phase: FetchPhase);
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMetricsSink;

impl MetricsSink for NullMetricsSink {
    fn record_result(&self, _run_id: &str, _result: &SliResult) {}

    fn record_fetch_failure(&self, _run_id: &str, _phase: FetchPhase) {}
}

/// One event captured by [`MemoryMetricsSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Result {
        run_id: String,
        sli_id: String,
        status: Status,
        value: Option<f64>,
    },
    FetchFailure {
        run_id: String,
        phase: FetchPhase,
    },
}

/// A sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct MemoryMetricsSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl MemoryMetricsSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the events recorded so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    fn push(&self, event: SinkEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl MetricsSink for MemoryMetricsSink {
    fn record_result(&self, run_id: &str, result: &SliResult) {
        self.push(SinkEvent::Result {
            run_id: run_id.to_string(),
            sli_id: result.id.clone(),
            status: result.status,
            value: result.value,
        });
    }

    fn record_fetch_failure(&self, run_id: &str, phase: FetchPhase) {
        self.push(SinkEvent::FetchFailure {
            run_id: run_id.to_string(),
            phase,
        });
    }
}
