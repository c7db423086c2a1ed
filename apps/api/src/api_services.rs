use std::sync::Arc;

use stagehand_application::{
    AuditLogService, AuditRecorder, Clock, LatencySimulator, MutationGate, RoleService,
    UserService,
};
use stagehand_core::{ActorIdentity, AppError};
use stagehand_infrastructure::{InMemoryRecordStore, SystemClock};
use tracing::info;

use crate::api_config::ApiConfig;
use crate::state::AppState;

/// Builds the record store and services described by `config`.
pub fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let store = if config.seed_data {
        InMemoryRecordStore::with_seed_data()?
    } else {
        InMemoryRecordStore::new()
    };
    info!(seed_data = config.seed_data, "record store initialized");

    Ok(assemble_app_state(
        Arc::new(store),
        Arc::new(config.latency.simulator()),
        config.default_actor.clone(),
    ))
}

/// Wires services over one shared store, clock and mutation gate.
pub fn assemble_app_state(
    store: Arc<InMemoryRecordStore>,
    latency_simulator: Arc<dyn LatencySimulator>,
    default_actor: ActorIdentity,
) -> AppState {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mutation_gate = MutationGate::new();
    let audit_recorder = AuditRecorder::new(store.clone(), clock.clone());

    AppState {
        user_service: UserService::new(
            store.clone(),
            store.clone(),
            audit_recorder.clone(),
            clock.clone(),
            mutation_gate.clone(),
        ),
        role_service: RoleService::new(
            store.clone(),
            store.clone(),
            audit_recorder,
            clock,
            mutation_gate,
        ),
        audit_log_service: AuditLogService::new(store),
        latency_simulator,
        default_actor,
    }
}
