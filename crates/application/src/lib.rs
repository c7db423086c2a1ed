//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_log_service;
mod audit_recorder;
mod deletion;
mod latency;
mod mutation_gate;
mod record_store_ports;
mod role_service;
mod user_service;

#[cfg(test)]
mod test_support;

pub use audit_log_service::{AuditLogQuery, AuditLogService};
pub use audit_recorder::{AuditRecord, AuditRecorder};
pub use deletion::DeleteAcknowledgement;
pub use latency::{LatencySimulator, RequestKind};
pub use mutation_gate::MutationGate;
pub use record_store_ports::{AuditLogRepository, Clock, RoleRepository, UserRepository};
pub use role_service::{RoleListQuery, RoleService};
pub use user_service::{CreateUserInput, UserListQuery, UserService};
