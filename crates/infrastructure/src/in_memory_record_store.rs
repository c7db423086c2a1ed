use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stagehand_application::{AuditLogRepository, RoleRepository, UserRepository};
use stagehand_core::AppResult;
use stagehand_domain::{AuditLogEntry, RecordId, RecordKind, Role, User};
use tokio::sync::RwLock;
use tracing::debug;

mod seed_data;


/// Process-local record store backing every repository port.
///
/// Collections keep insertion order. Counters only move forward, so
/// identifiers of removed records are never handed out again.
#[derive(Debug)]
pub struct InMemoryRecordStore {
    users: RwLock<Vec<User>>,
    roles: RwLock<Vec<Role>>,
    audit_entries: RwLock<Vec<AuditLogEntry>>,
    user_counter: AtomicU64,
    role_counter: AtomicU64,
    audit_log_counter: AtomicU64,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    /// Creates an empty store with every counter at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Vec::new())
    }

    /// Creates a store preloaded with the console fixture set.
    ///
    /// Three roles, three users and three historical audit entries. Counters
    /// continue after the highest seeded identifier.
    pub fn with_seed_data() -> AppResult<Self> {
        let users = seed_data::users()?;
        let roles = seed_data::roles()?;
        let audit_entries = seed_data::audit_entries()?;

        debug!(
            users = users.len(),
            roles = roles.len(),
            audit_entries = audit_entries.len(),
            "record store seeded"
        );

        Ok(Self::from_parts(users, roles, audit_entries))
    }

    fn from_parts(users: Vec<User>, roles: Vec<Role>, audit_entries: Vec<AuditLogEntry>) -> Self {
        let user_counter = next_after(users.iter().map(User::id));
        let role_counter = next_after(roles.iter().map(Role::id));
        let audit_log_counter = next_after(audit_entries.iter().map(|entry| &entry.id));

        Self {
            users: RwLock::new(users),
            roles: RwLock::new(roles),
            audit_entries: RwLock::new(audit_entries),
            user_counter: AtomicU64::new(user_counter),
            role_counter: AtomicU64::new(role_counter),
            audit_log_counter: AtomicU64::new(audit_log_counter),
        }
    }

    fn next_id(&self, kind: RecordKind) -> RecordId {
        let counter = match kind {
            RecordKind::User => &self.user_counter,
            RecordKind::Role => &self.role_counter,
            RecordKind::AuditLog => &self.audit_log_counter,
        };

        let value = counter.fetch_add(1, Ordering::SeqCst);
        debug!(kind = kind.as_str(), value, "identifier drawn");
        RecordId::from_sequence(value)
    }
}

/// Returns the counter start following the highest numeric identifier.
fn next_after<'a>(ids: impl Iterator<Item = &'a RecordId>) -> u64 {
    ids.filter_map(|id| id.as_str().parse::<u64>().ok())
        .max()
        .map_or(1, |highest| highest + 1)
}

#[async_trait]
impl UserRepository for InMemoryRecordStore {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_user(&self, user_id: &RecordId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.id() == user_id)
            .cloned())
    }

    async fn insert_user(&self, user: User) -> AppResult<()> {
        self.users.write().await.push(user);
        Ok(())
    }

    async fn replace_user(&self, user: User) -> AppResult<()> {
        let mut users = self.users.write().await;
        if let Some(stored) = users.iter_mut().find(|stored| stored.id() == user.id()) {
            *stored = user;
        }
        Ok(())
    }

    async fn remove_user(&self, user_id: &RecordId) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        let index = users.iter().position(|user| user.id() == user_id);
        Ok(index.map(|index| users.remove(index)))
    }

    async fn next_user_id(&self) -> AppResult<RecordId> {
        Ok(self.next_id(RecordKind::User))
    }
}

#[async_trait]
impl RoleRepository for InMemoryRecordStore {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.read().await.clone())
    }

    async fn find_role(&self, role_id: &RecordId) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .read()
            .await
            .iter()
            .find(|role| role.id() == role_id)
            .cloned())
    }

    async fn insert_role(&self, role: Role) -> AppResult<()> {
        self.roles.write().await.push(role);
        Ok(())
    }

    async fn replace_role(&self, role: Role) -> AppResult<()> {
        let mut roles = self.roles.write().await;
        if let Some(stored) = roles.iter_mut().find(|stored| stored.id() == role.id()) {
            *stored = role;
        }
        Ok(())
    }

    async fn remove_role(&self, role_id: &RecordId) -> AppResult<Option<Role>> {
        let mut roles = self.roles.write().await;
        let index = roles.iter().position(|role| role.id() == role_id);
        Ok(index.map(|index| roles.remove(index)))
    }

    async fn next_role_id(&self) -> AppResult<RecordId> {
        Ok(self.next_id(RecordKind::Role))
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryRecordStore {
    async fn list_entries(&self) -> AppResult<Vec<AuditLogEntry>> {
        Ok(self.audit_entries.read().await.clone())
    }

    async fn append_entry(&self, entry: AuditLogEntry) -> AppResult<()> {
        self.audit_entries.write().await.push(entry);
        Ok(())
    }

    async fn latest_timestamp(&self) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self
            .audit_entries
            .read()
            .await
            .last()
            .map(|entry| entry.timestamp))
    }

    async fn next_audit_log_id(&self) -> AppResult<RecordId> {
        Ok(self.next_id(RecordKind::AuditLog))
    }
}
