use std::sync::Arc;

use stagehand_application::{AuditLogService, LatencySimulator, RoleService, UserService};
use stagehand_core::ActorIdentity;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub role_service: RoleService,
    pub audit_log_service: AuditLogService,
    pub latency_simulator: Arc<dyn LatencySimulator>,
    pub default_actor: ActorIdentity,
}
