//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
mod record;
mod role;
mod user;

pub use audit::{AuditAction, AuditEntity, AuditLogEntry, FieldChanges};
pub use record::{RecordId, RecordKind, RecordName};
pub use role::{Permission, Role, RoleDraft};
pub use user::{
    EmailAddress, User, UserPatch,
    validate_password, validate_password_confirmation,
};
