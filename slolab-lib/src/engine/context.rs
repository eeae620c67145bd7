use crate::Result;
use core::future::Future;
use core::time::Duration;
use ohno::bail;
use tokio::time::Instant;

/// Deadline carried through an engine run and handed to fetchers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecContext {
    deadline: Option<Instant>,
}

impl ExecContext {
    /// A context without a deadline.
    #[must_use]
    pub const fn background() -> Self {
        Self { deadline: None }
    }

    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
        }
    }

    #[must_use]
    pub const fn with_deadline(deadline: Instant) -> Self {
        Self { deadline: Some(deadline) }
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` if there is no deadline.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Drive `fut` to completion, failing with `deadline exceeded` if the deadline fires first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output> {
        let Some(deadline) = self.deadline else {
            return Ok(fut.await);
        };

        match tokio::time::timeout_at(deadline, fut).await {
            Ok(output) => Ok(output),
            Err(_) => bail!("deadline exceeded"),
        }
    }
}
