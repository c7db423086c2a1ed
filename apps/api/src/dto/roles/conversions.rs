use stagehand_application::RoleListQuery;
use stagehand_core::AppResult;
use stagehand_domain::{Permission, Role, RoleDraft};

use super::types::{RoleListParams, RoleRequest, RoleResponse};
use crate::dto::common::format_timestamp;

impl RoleRequest {
    /// Validates the body; name and a non-empty permission list are required.
    pub fn into_draft(self) -> AppResult<RoleDraft> {
        RoleDraft::new(
            self.name.unwrap_or_default(),
            self.description,
            self.permissions.unwrap_or_default(),
        )
    }
}

impl RoleListParams {
    /// Converts raw query values into service filters.
    pub fn into_query(self) -> RoleListQuery {
        RoleListQuery {
            text: self.q.and_then(|value| value.into_text()),
        }
    }
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id().to_string(),
            name: role.name().as_str().to_owned(),
            description: role.description().map(ToOwned::to_owned),
            permissions: role
                .permissions()
                .iter()
                .map(Permission::as_str)
                .map(ToOwned::to_owned)
                .collect(),
            created_at: format_timestamp(role.created_at()),
            updated_at: format_timestamp(role.updated_at()),
        }
    }
}
