//! Role management service.

use std::sync::Arc;

use tracing::{info, warn};

use stagehand_core::{ActorIdentity, AppError, AppResult};
use stagehand_domain::{AuditAction, AuditEntity, RecordId, Role, RoleDraft};

use crate::{
    AuditRecord, AuditRecorder, Clock, DeleteAcknowledgement, MutationGate, RoleRepository,
    UserRepository,
};


/// Filters for role listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleListQuery {
    /// Case-insensitive substring of the role name.
    pub text: Option<String>,
}

impl RoleListQuery {
    /// Returns whether `role` passes the filter.
    #[must_use]
    pub fn matches(&self, role: &Role) -> bool {
        self.text.as_deref().is_none_or(|text| {
            role.name()
                .as_str()
                .to_lowercase()
                .contains(&text.to_lowercase())
        })
    }
}

/// Application service for role records.
#[derive(Clone)]
pub struct RoleService {
    role_repository: Arc<dyn RoleRepository>,
    user_repository: Arc<dyn UserRepository>,
    audit_recorder: AuditRecorder,
    clock: Arc<dyn Clock>,
    mutation_gate: MutationGate,
}

impl RoleService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        role_repository: Arc<dyn RoleRepository>,
        user_repository: Arc<dyn UserRepository>,
        audit_recorder: AuditRecorder,
        clock: Arc<dyn Clock>,
        mutation_gate: MutationGate,
    ) -> Self {
        Self {
            role_repository,
            user_repository,
            audit_recorder,
            clock,
            mutation_gate,
        }
    }

    /// Lists roles matching `query`.
    pub async fn list_roles(&self, query: &RoleListQuery) -> AppResult<Vec<Role>> {
        Ok(self
            .role_repository
            .list_roles()
            .await?
            .into_iter()
            .filter(|role| query.matches(role))
            .collect())
    }

    /// Returns one role.
    pub async fn get_role(&self, role_id: &RecordId) -> AppResult<Role> {
        self.role_repository
            .find_role(role_id)
            .await?
            .ok_or_else(|| role_not_found(role_id))
    }

    /// Creates a role and emits a CREATE audit entry.
    pub async fn create_role(&self, actor: &ActorIdentity, draft: RoleDraft) -> AppResult<Role> {
        let _guard = self.mutation_gate.enter().await;

        self.ensure_name_available(&draft, None).await?;

        let role = Role::new(
            self.role_repository.next_role_id().await?,
            draft,
            self.clock.now(),
        );
        self.role_repository.insert_role(role.clone()).await?;

        self.audit_recorder
            .record(
                actor,
                AuditRecord {
                    action: AuditAction::Create,
                    entity: AuditEntity::Role,
                    entity_id: role.id().clone(),
                    message: format!("role {} was created", role.name().as_str()),
                    changes: None,
                },
            )
            .await?;

        info!(role_id = %role.id(), actor_id = actor.actor_id(), "role created");
        Ok(role)
    }

    /// Replaces name, description and permissions and emits an UPDATE entry.
    pub async fn replace_role(
        &self,
        actor: &ActorIdentity,
        role_id: &RecordId,
        draft: RoleDraft,
    ) -> AppResult<Role> {
        let _guard = self.mutation_gate.enter().await;

        let existing = self.get_role(role_id).await?;
        self.ensure_name_available(&draft, Some(role_id)).await?;

        let (role, changes) = existing.replaced(draft, self.clock.now());
        self.role_repository.replace_role(role.clone()).await?;

        self.audit_recorder
            .record(
                actor,
                AuditRecord {
                    action: AuditAction::Update,
                    entity: AuditEntity::Role,
                    entity_id: role.id().clone(),
                    message: format!("role {} was updated", role.name().as_str()),
                    changes: Some(changes.into_value()),
                },
            )
            .await?;

        info!(role_id = %role.id(), actor_id = actor.actor_id(), "role updated");
        Ok(role)
    }

    /// Deletes an unreferenced role and emits a DELETE audit entry.
    pub async fn delete_role(
        &self,
        actor: &ActorIdentity,
        role_id: &RecordId,
    ) -> AppResult<DeleteAcknowledgement> {
        let _guard = self.mutation_gate.enter().await;

        self.get_role(role_id).await?;

        let assigned_users = self
            .user_repository
            .list_users()
            .await?
            .iter()
            .filter(|user| user.role_id() == role_id)
            .count();
        if assigned_users > 0 {
            warn!(role_id = %role_id, assigned_users, "refused to delete role in use");
            return Err(AppError::RoleInUse(format!(
                "role '{role_id}' is assigned to {assigned_users} user(s)"
            )));
        }

        let removed = self
            .role_repository
            .remove_role(role_id)
            .await?
            .ok_or_else(|| role_not_found(role_id))?;

        self.audit_recorder
            .record(
                actor,
                AuditRecord {
                    action: AuditAction::Delete,
                    entity: AuditEntity::Role,
                    entity_id: removed.id().clone(),
                    message: format!("role {} was deleted", removed.name().as_str()),
                    changes: None,
                },
            )
            .await?;

        info!(role_id = %removed.id(), actor_id = actor.actor_id(), "role deleted");
        Ok(DeleteAcknowledgement::new("role was deleted"))
    }

    async fn ensure_name_available(
        &self,
        draft: &RoleDraft,
        excluded_role_id: Option<&RecordId>,
    ) -> AppResult<()> {
        let taken = self
            .role_repository
            .list_roles()
            .await?
            .iter()
            .any(|role| role.name() == draft.name() && Some(role.id()) != excluded_role_id);

        if taken {
            return Err(AppError::DuplicateRole(format!(
                "role name '{}' is already in use",
                draft.name().as_str()
            )));
        }

        Ok(())
    }
}

fn role_not_found(role_id: &RecordId) -> AppError {
    AppError::NotFound(format!("role '{role_id}' was not found"))
}
