use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use stagehand_core::AppError;

use crate::RecordId;

/// Actions recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// A record was created.
    Create,
    /// A record was updated.
    Update,
    /// A record was deleted.
    Delete,
    /// An actor signed in.
    Login,
    /// An actor signed out.
    Logout,
}

impl AuditAction {
    /// Returns the transport value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
        }
    }
}

impl FromStr for AuditAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CREATE" => Ok(Self::Create),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            "LOGIN" => Ok(Self::Login),
            "LOGOUT" => Ok(Self::Logout),
            _ => Err(AppError::Validation(format!(
                "unknown audit action '{value}'"
            ))),
        }
    }
}

/// Resource kinds referenced by audit entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEntity {
    /// User records.
    User,
    /// Role records.
    Role,
    /// Permission grants.
    Permission,
}

impl AuditEntity {
    /// Returns the transport value for this entity kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Role => "ROLE",
            Self::Permission => "PERMISSION",
        }
    }
}

impl FromStr for AuditEntity {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "USER" => Ok(Self::User),
            "ROLE" => Ok(Self::Role),
            "PERMISSION" => Ok(Self::Permission),
            _ => Err(AppError::Validation(format!(
                "unknown audit entity '{value}'"
            ))),
        }
    }
}

/// Append-only audit trail entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Entry identifier.
    pub id: RecordId,
    /// Recorded action.
    pub action: AuditAction,
    /// Kind of the affected record.
    pub entity: AuditEntity,
    /// Identifier of the affected record.
    pub entity_id: RecordId,
    /// Identifier of the acting subject.
    pub actor_id: String,
    /// Display name of the acting subject.
    pub actor_name: String,
    /// Human-readable description.
    pub message: String,
    /// Time the entry was written.
    pub timestamp: DateTime<Utc>,
    /// Field-level change payload for updates.
    pub changes: Option<Value>,
}

/// Collects `{ field: { from, to } }` pairs for changed fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldChanges(Map<String, Value>);

impl FieldChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `field` when `from` and `to` differ.
    pub fn track<T>(&mut self, field: &str, from: &T, to: &T)
    where
        T: PartialEq + Serialize + ?Sized,
    {
        if from != to {
            self.0
                .insert(field.to_owned(), json!({ "from": from, "to": to }));
        }
    }

    /// Returns whether no field changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the names of changed fields.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Converts the change set into the stored JSON payload.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
