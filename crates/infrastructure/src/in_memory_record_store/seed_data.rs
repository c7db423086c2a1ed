//! Fixture set loaded by [`super::InMemoryRecordStore::with_seed_data`].

use chrono::{DateTime, TimeZone, Utc};
use stagehand_core::{AppError, AppResult};
use stagehand_domain::{
    AuditAction, AuditEntity, AuditLogEntry, EmailAddress, RecordId, RecordName, Role, RoleDraft,
    User,
};

const SEED_ACTOR_ID: &str = "1";
const SEED_ACTOR_NAME: &str = "Super Admin";

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> AppResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .ok_or_else(|| {
            AppError::Internal(format!(
                "invalid seed timestamp {year}-{month:02}-{day:02}T{hour:02}:{minute:02}"
            ))
        })
}

fn role(id: u64, name: &str, description: &str, permissions: &[&str]) -> AppResult<Role> {
    let draft = RoleDraft::new(
        name,
        Some(description.to_owned()),
        permissions.iter().map(|value| (*value).to_owned()).collect(),
    )?;
    Ok(Role::new(RecordId::from_sequence(id), draft, at(2024, 1, 10, 0, 0)?))
}

pub(super) fn roles() -> AppResult<Vec<Role>> {
    Ok(vec![
        role(
            1,
            "Super Admin",
            "All permissions",
            &["read", "create", "update", "delete", "audit"],
        )?,
        role(
            2,
            "Sub Admin",
            "Basic management permissions",
            &["read", "create", "update"],
        )?,
        role(3, "Viewer", "Read only", &["read"])?,
    ])
}

fn user(
    id: u64,
    name: &str,
    email: &str,
    role_id: u64,
    created_at: DateTime<Utc>,
) -> AppResult<User> {
    Ok(User::new(
        RecordId::from_sequence(id),
        RecordName::new(name, "name")?,
        EmailAddress::new(email)?,
        RecordId::from_sequence(role_id),
        true,
        created_at,
    ))
}

pub(super) fn users() -> AppResult<Vec<User>> {
    Ok(vec![
        user(1, "Super Admin", "admin@example.com", 1, at(2024, 1, 15, 0, 0)?)?,
        user(2, "Hong Gildong", "hong@example.com", 2, at(2024, 1, 20, 0, 0)?)?,
        user(3, "Kim Cheolsu", "kim@example.com", 3, at(2024, 2, 1, 0, 0)?)?,
    ])
}

fn entry(
    id: u64,
    action: AuditAction,
    entity: AuditEntity,
    entity_id: u64,
    message: &str,
    timestamp: DateTime<Utc>,
) -> AuditLogEntry {
    AuditLogEntry {
        id: RecordId::from_sequence(id),
        action,
        entity,
        entity_id: RecordId::from_sequence(entity_id),
        actor_id: SEED_ACTOR_ID.to_owned(),
        actor_name: SEED_ACTOR_NAME.to_owned(),
        message: message.to_owned(),
        timestamp,
        changes: None,
    }
}

/// Historical entries, oldest first so insertion order matches time order.
pub(super) fn audit_entries() -> AppResult<Vec<AuditLogEntry>> {
    Ok(vec![
        entry(
            3,
            AuditAction::Update,
            AuditEntity::Role,
            2,
            "role Sub Admin was updated",
            at(2024, 2, 8, 9, 15)?,
        ),
        entry(
            2,
            AuditAction::Create,
            AuditEntity::User,
            2,
            "user Hong Gildong was created",
            at(2024, 2, 9, 14, 30)?,
        ),
        entry(
            1,
            AuditAction::Login,
            AuditEntity::User,
            1,
            "Super Admin signed in",
            at(2024, 2, 10, 10, 0)?,
        ),
    ])
}
