mod audit_logs;
mod common;
mod roles;
mod users;

pub use audit_logs::{AuditLogListParams, AuditLogResponse};
pub use common::{DeleteResponse, HealthResponse, decode_body, decode_query};
pub use roles::{RoleListParams, RoleRequest, RoleResponse};
pub use users::{CreateUserRequest, UpdateUserRequest, UserListParams, UserResponse};
