use std::sync::Arc;

use chrono::{DateTime, Utc};

use stagehand_core::AppResult;
use stagehand_domain::{AuditAction, AuditEntity, AuditLogEntry};

use crate::AuditLogRepository;

/// Filters for audit log listing, combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLogQuery {
    /// Case-insensitive substring of the message.
    pub text: Option<String>,
    /// Exact action.
    pub action: Option<AuditAction>,
    /// Exact entity kind.
    pub entity: Option<AuditEntity>,
    /// Inclusive lower bound on the timestamp.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the timestamp.
    pub to: Option<DateTime<Utc>>,
}

impl AuditLogQuery {
    /// Returns whether `entry` passes every configured filter.
    #[must_use]
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        let text_matches = self.text.as_deref().is_none_or(|text| {
            entry
                .message
                .to_lowercase()
                .contains(&text.to_lowercase())
        });

        text_matches
            && self.action.is_none_or(|action| entry.action == action)
            && self.entity.is_none_or(|entity| entry.entity == entity)
            && self.from.is_none_or(|from| entry.timestamp >= from)
            && self.to.is_none_or(|to| entry.timestamp <= to)
    }
}

/// Read-only access to the audit trail.
#[derive(Clone)]
pub struct AuditLogService {
    repository: Arc<dyn AuditLogRepository>,
}

impl AuditLogService {
    /// Creates a new service over `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn AuditLogRepository>) -> Self {
        Self { repository }
    }

    /// Lists matching entries, newest first.
    ///
    /// Entries sharing a timestamp keep reverse insertion order.
    pub async fn list_entries(&self, query: &AuditLogQuery) -> AppResult<Vec<AuditLogEntry>> {
        let mut entries: Vec<AuditLogEntry> = self
            .repository
            .list_entries()
            .await?
            .into_iter()
            .rev()
            .filter(|entry| query.matches(entry))
            .collect();
        entries.sort_by(|left, right| right.timestamp.cmp(&left.timestamp));

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};

    use stagehand_domain::{AuditAction, AuditEntity, AuditLogEntry, RecordId};

    use crate::test_support::FakeRecordStore;

    use super::{AuditLogQuery, AuditLogService};

    fn entry(id: u64, action: AuditAction, message: &str, offset_minutes: i64) -> AuditLogEntry {
        let base = Utc
            .with_ymd_and_hms(2024, 2, 8, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        AuditLogEntry {
            id: RecordId::from_sequence(id),
            action,
            entity: AuditEntity::User,
            entity_id: RecordId::from_sequence(1),
            actor_id: "1".to_owned(),
            actor_name: "Super Admin".to_owned(),
            message: message.to_owned(),
            timestamp: base + Duration::minutes(offset_minutes),
            changes: None,
        }
    }

    async fn service_with(entries: Vec<AuditLogEntry>) -> AuditLogService {
        let store = Arc::new(FakeRecordStore::default());
        store.audit_entries.lock().await.extend(entries);
        AuditLogService::new(store)
    }

    #[tokio::test]
    async fn entries_are_listed_newest_first() {
        let service = service_with(vec![
            entry(1, AuditAction::Login, "Super Admin signed in", 0),
            entry(2, AuditAction::Create, "user Hong was created", 30),
            entry(3, AuditAction::Update, "role Viewer was updated", 30),
            entry(4, AuditAction::Delete, "user Hong was deleted", 90),
        ])
        .await;

        let listed = service.list_entries(&AuditLogQuery::default()).await;
        let ids: Vec<String> = listed
            .unwrap_or_default()
            .iter()
            .map(|entry| entry.id.to_string())
            .collect();

        assert_eq!(ids, vec!["4", "3", "2", "1"]);
    }

    #[tokio::test]
    async fn filters_combine_with_and() {
        let service = service_with(vec![
            entry(1, AuditAction::Create, "user Hong was created", 0),
            entry(2, AuditAction::Create, "role Viewer was created", 10),
            entry(3, AuditAction::Delete, "user Hong was deleted", 20),
        ])
        .await;

        let listed = service
            .list_entries(&AuditLogQuery {
                text: Some("HONG".to_owned()),
                action: Some(AuditAction::Create),
                ..AuditLogQuery::default()
            })
            .await
            .unwrap_or_default();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id.as_str(), "1");
    }

    #[tokio::test]
    async fn date_bounds_are_inclusive() {
        let entries = vec![
            entry(1, AuditAction::Login, "a", 0),
            entry(2, AuditAction::Login, "b", 60),
            entry(3, AuditAction::Login, "c", 120),
        ];
        let from = entries[1].timestamp;
        let to = entries[2].timestamp;
        let service = service_with(entries).await;

        let listed = service
            .list_entries(&AuditLogQuery {
                from: Some(from),
                to: Some(to),
                ..AuditLogQuery::default()
            })
            .await
            .unwrap_or_default();

        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn entity_filter_excludes_other_kinds() {
        let mut role_entry = entry(2, AuditAction::Update, "role Viewer was updated", 5);
        role_entry.entity = AuditEntity::Role;
        let service = service_with(vec![entry(1, AuditAction::Login, "a", 0), role_entry]).await;

        let listed = service
            .list_entries(&AuditLogQuery {
                entity: Some(AuditEntity::Role),
                ..AuditLogQuery::default()
            })
            .await
            .unwrap_or_default();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].entity, AuditEntity::Role);
    }
}
