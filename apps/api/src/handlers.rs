use serde_json::{Map, Value};

use stagehand_core::{ActorIdentity, AppResult};
use stagehand_domain::RecordId;

use crate::dto::{
    AuditLogListParams, AuditLogResponse, CreateUserRequest, DeleteResponse, RoleListParams,
    RoleRequest, RoleResponse, UpdateUserRequest, UserListParams, UserResponse, decode_body,
    decode_query,
};
use crate::request_router::ApiResponse;
use crate::state::AppState;

mod audit_logs;
mod health;
mod mock_transport;
mod roles;
mod users;

pub use audit_logs::list_audit_logs_handler;
pub use health::health_handler;
pub use mock_transport::mock_request_handler;
pub use roles::{
    create_role_handler, delete_role_handler, get_role_handler, list_roles_handler,
    replace_role_handler,
};
pub use users::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    update_user_handler,
};
