//! Shared primitives for all Rust crates in Stagehand.

#![forbid(unsafe_code)]

/// Actor identity recorded on audited mutations.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::ActorIdentity;

/// Result type used across Stagehand crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Error categories surfaced to callers of the mock backend.
///
/// Every variant maps to a stable machine-readable code and an HTTP-style
/// status, see [`AppError::code`] and [`AppError::status`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Requested resource or endpoint does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Input is missing required fields or violates a shape rule.
    #[error("validation error: {0}")]
    Validation(String),

    /// Another user already owns the email address.
    #[error("duplicate email: {0}")]
    DuplicateEmail(String),

    /// Another role already uses the name.
    #[error("duplicate role: {0}")]
    DuplicateRole(String),

    /// Referenced role does not exist.
    #[error("invalid role: {0}")]
    InvalidRole(String),

    /// Role is still referenced by at least one user.
    #[error("role in use: {0}")]
    RoleInUse(String),

    /// Method and path do not match any route.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            Self::DuplicateRole(_) => "DUPLICATE_ROLE",
            Self::InvalidRole(_) => "INVALID_ROLE",
            Self::RoleInUse(_) => "ROLE_IN_USE",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status associated with the error.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) | Self::InvalidRole(_) | Self::BadRequest(_) => 400,
            Self::DuplicateEmail(_) | Self::DuplicateRole(_) | Self::RoleInUse(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the human-readable message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(message)
            | Self::Validation(message)
            | Self::DuplicateEmail(message)
            | Self::DuplicateRole(message)
            | Self::InvalidRole(message)
            | Self::RoleInUse(message)
            | Self::BadRequest(message)
            | Self::Internal(message) => message.as_str(),
        }
    }
}
