use std::time::Duration;

use async_trait::async_trait;
use stagehand_application::{LatencySimulator, RequestKind};
use tracing::trace;

/// Latency simulator that parks the request on the tokio timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokioLatencySimulator {
    read: Duration,
    write: Duration,
    delete: Duration,
}

impl TokioLatencySimulator {
    /// Default read delay.
    pub const DEFAULT_READ: Duration = Duration::from_millis(300);
    /// Default create and update delay.
    pub const DEFAULT_WRITE: Duration = Duration::from_millis(500);
    /// Default delete delay.
    pub const DEFAULT_DELETE: Duration = Duration::from_millis(400);

    /// Creates a simulator with explicit per-kind delays.
    #[must_use]
    pub fn new(read: Duration, write: Duration, delete: Duration) -> Self {
        Self {
            read,
            write,
            delete,
        }
    }

    /// Creates a simulator that never waits.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, Duration::ZERO)
    }

    /// Returns the delay applied to `kind`.
    #[must_use]
    pub fn delay_for(&self, kind: RequestKind) -> Duration {
        match kind {
            RequestKind::Read => self.read,
            RequestKind::Write => self.write,
            RequestKind::Delete => self.delete,
        }
    }
}

impl Default for TokioLatencySimulator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_READ, Self::DEFAULT_WRITE, Self::DEFAULT_DELETE)
    }
}

#[async_trait]
impl LatencySimulator for TokioLatencySimulator {
    async fn delay(&self, kind: RequestKind) {
        let delay = self.delay_for(kind);
        if delay.is_zero() {
            return;
        }

        trace!(kind = kind.as_str(), ?delay, "simulating latency");
        tokio::time::sleep(delay).await;
    }
}
