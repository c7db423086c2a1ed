use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use stagehand_core::{ActorIdentity, AppResult};
use stagehand_domain::{AuditAction, AuditEntity, AuditLogEntry, RecordId};

use crate::{AuditLogRepository, Clock};

/// Audit payload describing one successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    /// Performed action.
    pub action: AuditAction,
    /// Kind of the affected record.
    pub entity: AuditEntity,
    /// Identifier of the affected record.
    pub entity_id: RecordId,
    /// Human-readable description.
    pub message: String,
    /// Optional field-level change payload.
    pub changes: Option<Value>,
}

/// Appends audit entries for successful mutations.
#[derive(Clone)]
pub struct AuditRecorder {
    repository: Arc<dyn AuditLogRepository>,
    clock: Arc<dyn Clock>,
}

impl AuditRecorder {
    /// Creates a recorder writing to `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn AuditLogRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Builds and appends one entry attributed to `actor`.
    ///
    /// The timestamp never precedes the latest stored entry, so insertion
    /// order stays non-decreasing when the wall clock steps back. Callers
    /// hold the mutation gate.
    pub async fn record(
        &self,
        actor: &ActorIdentity,
        record: AuditRecord,
    ) -> AppResult<AuditLogEntry> {
        let now = self.clock.now();
        let timestamp = match self.repository.latest_timestamp().await? {
            Some(latest) if latest > now => latest,
            _ => now,
        };

        let entry = AuditLogEntry {
            id: self.repository.next_audit_log_id().await?,
            action: record.action,
            entity: record.entity,
            entity_id: record.entity_id,
            actor_id: actor.actor_id().to_owned(),
            actor_name: actor.display_name().to_owned(),
            message: record.message,
            timestamp,
            changes: record.changes,
        };

        self.repository.append_entry(entry.clone()).await?;

        debug!(
            audit_id = %entry.id,
            action = entry.action.as_str(),
            entity = entry.entity.as_str(),
            entity_id = %entry.entity_id,
            actor_id = %entry.actor_id,
            "audit entry recorded"
        );

        Ok(entry)
    }
}
