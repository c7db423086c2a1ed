use async_trait::async_trait;

/// Request classes with distinct simulated round-trip times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// `GET` requests.
    Read,
    /// `POST` and `PUT` requests.
    Write,
    /// `DELETE` requests.
    Delete,
}

impl RequestKind {
    /// Returns a stable label for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
        }
    }
}

/// Port that suspends a request to imitate network latency.
#[async_trait]
pub trait LatencySimulator: Send + Sync {
    /// Waits for the delay configured for `kind`.
    async fn delay(&self, kind: RequestKind);
}
