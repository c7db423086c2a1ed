//! User management service.
//!
//! Owns list, lookup, create, partial update and delete of console users.
//! Mutations enforce email uniqueness and role references under the shared
//! mutation gate and append one audit entry on success.

use std::sync::Arc;

use tracing::info;

use stagehand_core::{ActorIdentity, AppError, AppResult};
use stagehand_domain::{AuditAction, AuditEntity, EmailAddress, RecordId, RecordName, User, UserPatch};

use crate::{
    AuditRecord, AuditRecorder, Clock, DeleteAcknowledgement, MutationGate, RoleRepository,
    UserRepository,
};

#[cfg(test)]
mod tests;

/// Validated input for user creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    /// Display name.
    pub name: RecordName,
    /// Email address, unique across users.
    pub email: EmailAddress,
    /// Referenced role.
    pub role_id: RecordId,
    /// Activation flag; defaults to `true`.
    pub is_active: Option<bool>,
}

/// Filters for user listing, combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListQuery {
    /// Case-insensitive substring of name or email.
    pub text: Option<String>,
    /// Exact role reference.
    pub role_id: Option<RecordId>,
    /// Exact activation flag.
    pub is_active: Option<bool>,
}

impl UserListQuery {
    /// Returns whether `user` passes every configured filter.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        let text_matches = self.text.as_deref().is_none_or(|text| {
            let needle = text.to_lowercase();
            user.name().as_str().to_lowercase().contains(&needle)
                || user.email().as_str().to_lowercase().contains(&needle)
        });
        let role_matches = self
            .role_id
            .as_ref()
            .is_none_or(|role_id| user.role_id() == role_id);
        let active_matches = self
            .is_active
            .is_none_or(|is_active| user.is_active() == is_active);

        text_matches && role_matches && active_matches
    }
}

/// Application service for user records.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    role_repository: Arc<dyn RoleRepository>,
    audit_recorder: AuditRecorder,
    clock: Arc<dyn Clock>,
    mutation_gate: MutationGate,
}

impl UserService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        role_repository: Arc<dyn RoleRepository>,
        audit_recorder: AuditRecorder,
        clock: Arc<dyn Clock>,
        mutation_gate: MutationGate,
    ) -> Self {
        Self {
            user_repository,
            role_repository,
            audit_recorder,
            clock,
            mutation_gate,
        }
    }

    /// Lists users matching `query`. No pagination.
    pub async fn list_users(&self, query: &UserListQuery) -> AppResult<Vec<User>> {
        Ok(self
            .user_repository
            .list_users()
            .await?
            .into_iter()
            .filter(|user| query.matches(user))
            .collect())
    }

    /// Returns one user.
    pub async fn get_user(&self, user_id: &RecordId) -> AppResult<User> {
        self.user_repository
            .find_user(user_id)
            .await?
            .ok_or_else(|| user_not_found(user_id))
    }

    /// Creates a user and emits a CREATE audit entry.
    pub async fn create_user(
        &self,
        actor: &ActorIdentity,
        input: CreateUserInput,
    ) -> AppResult<User> {
        let _guard = self.mutation_gate.enter().await;

        self.ensure_email_available(&input.email, None).await?;
        self.ensure_role_exists(&input.role_id).await?;

        let user = User::new(
            self.user_repository.next_user_id().await?,
            input.name,
            input.email,
            input.role_id,
            input.is_active.unwrap_or(true),
            self.clock.now(),
        );
        self.user_repository.insert_user(user.clone()).await?;

        self.audit_recorder
            .record(
                actor,
                AuditRecord {
                    action: AuditAction::Create,
                    entity: AuditEntity::User,
                    entity_id: user.id().clone(),
                    message: format!("user {} was created", user.name().as_str()),
                    changes: None,
                },
            )
            .await?;

        info!(user_id = %user.id(), actor_id = actor.actor_id(), "user created");
        Ok(user)
    }

    /// Applies a partial update and emits an UPDATE audit entry.
    pub async fn update_user(
        &self,
        actor: &ActorIdentity,
        user_id: &RecordId,
        patch: UserPatch,
    ) -> AppResult<User> {
        let _guard = self.mutation_gate.enter().await;

        let existing = self.get_user(user_id).await?;

        if let Some(email) = patch.email.as_ref().filter(|email| !email.matches(existing.email())) {
            self.ensure_email_available(email, Some(user_id)).await?;
        }

        if let Some(role_id) = patch.role_id.as_ref() {
            self.ensure_role_exists(role_id).await?;
        }

        let (user, changes) = existing.patched(patch, self.clock.now());
        self.user_repository.replace_user(user.clone()).await?;

        self.audit_recorder
            .record(
                actor,
                AuditRecord {
                    action: AuditAction::Update,
                    entity: AuditEntity::User,
                    entity_id: user.id().clone(),
                    message: format!("user {} was updated", user.name().as_str()),
                    changes: Some(changes.into_value()),
                },
            )
            .await?;

        info!(user_id = %user.id(), actor_id = actor.actor_id(), "user updated");
        Ok(user)
    }

    /// Deletes a user and emits a DELETE audit entry.
    ///
    /// Deletion is never blocked by references.
    pub async fn delete_user(
        &self,
        actor: &ActorIdentity,
        user_id: &RecordId,
    ) -> AppResult<DeleteAcknowledgement> {
        let _guard = self.mutation_gate.enter().await;

        let removed = self
            .user_repository
            .remove_user(user_id)
            .await?
            .ok_or_else(|| user_not_found(user_id))?;

        self.audit_recorder
            .record(
                actor,
                AuditRecord {
                    action: AuditAction::Delete,
                    entity: AuditEntity::User,
                    entity_id: removed.id().clone(),
                    message: format!("user {} was deleted", removed.name().as_str()),
                    changes: None,
                },
            )
            .await?;

        info!(user_id = %removed.id(), actor_id = actor.actor_id(), "user deleted");
        Ok(DeleteAcknowledgement::new("user was deleted"))
    }

    async fn ensure_email_available(
        &self,
        email: &EmailAddress,
        excluded_user_id: Option<&RecordId>,
    ) -> AppResult<()> {
        let taken = self
            .user_repository
            .list_users()
            .await?
            .iter()
            .any(|user| user.email().matches(email) && Some(user.id()) != excluded_user_id);

        if taken {
            return Err(AppError::DuplicateEmail(format!(
                "email '{}' is already in use",
                email.as_str()
            )));
        }

        Ok(())
    }

    async fn ensure_role_exists(&self, role_id: &RecordId) -> AppResult<()> {
        if self.role_repository.find_role(role_id).await?.is_none() {
            return Err(AppError::InvalidRole(format!(
                "role '{role_id}' does not exist"
            )));
        }

        Ok(())
    }
}

fn user_not_found(user_id: &RecordId) -> AppError {
    AppError::NotFound(format!("user '{user_id}' was not found"))
}
