use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Serializes check-then-act sequences across the user and role services.
///
/// Holding the guard covers the existence and uniqueness checks, the store
/// mutation and the audit append of one request. Reads never enter the gate.
#[derive(Debug, Clone, Default)]
pub struct MutationGate {
    inner: Arc<Mutex<()>>,
}

impl MutationGate {
    /// Creates an unlocked gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other mutation is in flight.
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}
