mod conversions;
mod types;

pub use types::{AuditLogListParams, AuditLogResponse};
