use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use stagehand_core::{AppError, AppResult, NonEmptyString};

/// Minimum character count for user and role names.
pub(crate) const MIN_NAME_LENGTH: usize = 2;

/// Collections that draw identifiers from their own counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// User records.
    User,
    /// Role records.
    Role,
    /// Audit log entries.
    AuditLog,
}

impl RecordKind {
    /// Returns a stable label for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Role => "role",
            Self::AuditLog => "audit_log",
        }
    }
}

/// Opaque record identifier.
///
/// Identifiers are minted from per-kind counters as decimal strings, but
/// callers must treat them as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates an identifier from a counter value.
    #[must_use]
    pub fn from_sequence(value: u64) -> Self {
        Self(value.to_string())
    }

    /// Parses a caller-supplied identifier.
    pub fn parse(value: impl Into<String>) -> AppResult<Self> {
        let value = NonEmptyString::new(value)
            .map_err(|_| AppError::Validation("identifier must not be empty".to_owned()))?;
        Ok(Self(value.into()))
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RecordId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Human-facing record name with a minimum length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordName(NonEmptyString);

impl RecordName {
    /// Creates a validated name; `label` names the field in error messages.
    pub fn new(value: impl Into<String>, label: &str) -> AppResult<Self> {
        let value = NonEmptyString::new(value)
            .map_err(|_| AppError::Validation(format!("{label} is required")))?;

        if value.as_str().chars().count() < MIN_NAME_LENGTH {
            return Err(AppError::Validation(format!(
                "{label} must be at least {MIN_NAME_LENGTH} characters"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the name string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
