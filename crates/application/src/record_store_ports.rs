//! Ports over the record store.
//!
//! The store holds users, roles and audit entries plus one id counter per
//! collection. It performs no business validation: services check existence
//! and uniqueness before mutating, inside the [`crate::MutationGate`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use stagehand_core::AppResult;
use stagehand_domain::{AuditLogEntry, RecordId, Role, User};

/// Repository port for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists all users in insertion order.
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Finds a user by identifier.
    async fn find_user(&self, user_id: &RecordId) -> AppResult<Option<User>>;

    /// Appends a new user.
    async fn insert_user(&self, user: User) -> AppResult<()>;

    /// Replaces the stored user with the same identifier, keeping its position.
    async fn replace_user(&self, user: User) -> AppResult<()>;

    /// Removes a user and returns it, if present.
    async fn remove_user(&self, user_id: &RecordId) -> AppResult<Option<User>>;

    /// Draws the next user identifier.
    async fn next_user_id(&self) -> AppResult<RecordId>;
}

/// Repository port for role records.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Lists all roles in insertion order.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Finds a role by identifier.
    async fn find_role(&self, role_id: &RecordId) -> AppResult<Option<Role>>;

    /// Appends a new role.
    async fn insert_role(&self, role: Role) -> AppResult<()>;

    /// Replaces the stored role with the same identifier, keeping its position.
    async fn replace_role(&self, role: Role) -> AppResult<()>;

    /// Removes a role and returns it, if present.
    async fn remove_role(&self, role_id: &RecordId) -> AppResult<Option<Role>>;

    /// Draws the next role identifier.
    async fn next_role_id(&self) -> AppResult<RecordId>;
}

/// Repository port for the append-only audit trail.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Lists all entries in insertion order.
    async fn list_entries(&self) -> AppResult<Vec<AuditLogEntry>>;

    /// Appends an entry.
    async fn append_entry(&self, entry: AuditLogEntry) -> AppResult<()>;

    /// Returns the timestamp of the most recently appended entry.
    async fn latest_timestamp(&self) -> AppResult<Option<DateTime<Utc>>>;

    /// Draws the next audit entry identifier.
    async fn next_audit_log_id(&self) -> AppResult<RecordId>;
}

/// Time source for record and audit timestamps.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}
