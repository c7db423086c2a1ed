//! User domain types and validation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stagehand_core::{AppError, AppResult};

use crate::{FieldChanges, RecordId, RecordName};

/// Validated email address, stored as entered apart from surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    /// The stored value is only trimmed; see [`EmailAddress::matches`] for
    /// uniqueness comparisons.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_owned();

        if trimmed.is_empty() {
            return Err(AppError::Validation("email is required".to_owned()));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty()
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
        {
            return Err(AppError::Validation(
                "email domain must contain at least one inner '.'".to_owned(),
            ));
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(AppError::Validation(
                "email address must not contain whitespace".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the case-folded form used as the uniqueness key.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }

    /// Returns whether both addresses share the same uniqueness key.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

/// Minimum password length accepted by the console forms.
pub(crate) const PASSWORD_MIN_LENGTH: usize = 8;

/// Characters that satisfy the special-character rule.
pub(crate) const PASSWORD_SPECIAL_CHARACTERS: &str = "!@#$%^&*";

/// Validates a plaintext password against the console password policy.
///
/// - At least 8 characters.
/// - At least one ASCII uppercase letter.
/// - At least one ASCII digit.
/// - At least one of `!@#$%^&*`.
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }

    if !password.chars().any(|character| character.is_ascii_uppercase()) {
        return Err(AppError::Validation(
            "password must contain an uppercase letter".to_owned(),
        ));
    }

    if !password.chars().any(|character| character.is_ascii_digit()) {
        return Err(AppError::Validation(
            "password must contain a digit".to_owned(),
        ));
    }

    if !password
        .chars()
        .any(|character| PASSWORD_SPECIAL_CHARACTERS.contains(character))
    {
        return Err(AppError::Validation(format!(
            "password must contain one of {PASSWORD_SPECIAL_CHARACTERS}"
        )));
    }

    Ok(())
}

/// Checks that the confirmation field repeats the password.
pub fn validate_password_confirmation(password: &str, confirmation: Option<&str>) -> AppResult<()> {
    if confirmation != Some(password) {
        return Err(AppError::Validation(
            "password confirmation does not match".to_owned(),
        ));
    }

    Ok(())
}

/// Console user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: RecordId,
    name: RecordName,
    email: EmailAddress,
    role_id: RecordId,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Partial user update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement name.
    pub name: Option<RecordName>,
    /// Replacement email.
    pub email: Option<EmailAddress>,
    /// Replacement role reference.
    pub role_id: Option<RecordId>,
    /// Replacement activation flag.
    pub is_active: Option<bool>,
}

impl User {
    /// Creates a user stamped with `created_at` for both timestamps.
    #[must_use]
    pub fn new(
        id: RecordId,
        name: RecordName,
        email: EmailAddress,
        role_id: RecordId,
        is_active: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            role_id,
            is_active,
            created_at,
            updated_at: created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &RecordName {
        &self.name
    }

    /// Returns the unique email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the referenced role identifier.
    #[must_use]
    pub fn role_id(&self) -> &RecordId {
        &self.role_id
    }

    /// Returns whether the account is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
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

    /// Applies a partial update and reports which fields changed.
    ///
    /// `updated_at` is refreshed even when no field changes.
    #[must_use]
    pub fn patched(&self, patch: UserPatch, updated_at: DateTime<Utc>) -> (Self, FieldChanges) {
        let name = patch.name.unwrap_or_else(|| self.name.clone());
        let email = patch.email.unwrap_or_else(|| self.email.clone());
        let role_id = patch.role_id.unwrap_or_else(|| self.role_id.clone());
        let is_active = patch.is_active.unwrap_or(self.is_active);

        let mut changes = FieldChanges::new();
        changes.track("name", self.name.as_str(), name.as_str());
        changes.track("email", self.email.as_str(), email.as_str());
        changes.track("roleId", self.role_id.as_str(), role_id.as_str());
        changes.track("isActive", &self.is_active, &is_active);

        let user = Self {
            id: self.id.clone(),
            name,
            email,
            role_id,
            is_active,
            created_at: self.created_at,
            updated_at,
        };

        (user, changes)
    }
}
