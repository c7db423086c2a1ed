use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stagehand_core::{AppError, AppResult, NonEmptyString};

use crate::{FieldChanges, RecordId, RecordName};

/// Free-form permission token attached to a role.
///
/// The console currently grants `read`, `create`, `update`, `delete` and
/// `audit`, but any non-blank token is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(NonEmptyString);

impl Permission {
    /// Creates a validated permission token.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        NonEmptyString::new(value)
            .map(Self)
            .map_err(|_| AppError::Validation("permission must not be blank".to_owned()))
    }

    /// Returns the token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated role body used for both creation and full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDraft {
    name: RecordName,
    description: Option<String>,
    permissions: Vec<Permission>,
}

impl RoleDraft {
    /// Validates a role body.
    ///
    /// Blank descriptions become `None`. Blank permission tokens are skipped
    /// and duplicates are dropped keeping the first occurrence; at least one
    /// permission must remain.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        permissions: Vec<String>,
    ) -> AppResult<Self> {
        let name = RecordName::new(name, "role name")?;
        let description = description
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let mut unique: Vec<Permission> = Vec::with_capacity(permissions.len());
        for value in permissions.into_iter().filter(|value| !value.trim().is_empty()) {
            let permission = Permission::new(value)?;
            if !unique.contains(&permission) {
                unique.push(permission);
            }
        }

        if unique.is_empty() {
            return Err(AppError::Validation(
                "role must grant at least one permission".to_owned(),
            ));
        }

        Ok(Self {
            name,
            description,
            permissions: unique,
        })
    }

    /// Returns the validated role name.
    #[must_use]
    pub fn name(&self) -> &RecordName {
        &self.name
    }
}

/// Named bundle of permissions assignable to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RecordId,
    name: RecordName,
    description: Option<String>,
    permissions: Vec<Permission>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Role {
    /// Creates a role stamped with `created_at` for both timestamps.
    #[must_use]
    pub fn new(id: RecordId, draft: RoleDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            permissions: draft.permissions,
            created_at,
            updated_at: created_at,
        }
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Returns the unique role name.
    #[must_use]
    pub fn name(&self) -> &RecordName {
        &self.name
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns granted permissions in insertion order.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Returns the creation time.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification time.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces name, description and permissions wholesale.
    #[must_use]
    pub fn replaced(&self, draft: RoleDraft, updated_at: DateTime<Utc>) -> (Self, FieldChanges) {
        let mut changes = FieldChanges::new();
        changes.track("name", self.name.as_str(), draft.name.as_str());
        changes.track("description", &self.description, &draft.description);
        changes.track(
            "permissions",
            &permission_strings(&self.permissions),
            &permission_strings(&draft.permissions),
        );

        let role = Self {
            id: self.id.clone(),
            name: draft.name,
            description: draft.description,
            permissions: draft.permissions,
            created_at: self.created_at,
            updated_at,
        };

        (role, changes)
    }
}

fn permission_strings(permissions: &[Permission]) -> Vec<&str> {
    permissions.iter().map(Permission::as_str).collect()
}
