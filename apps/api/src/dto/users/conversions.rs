use stagehand_application::{CreateUserInput, UserListQuery};
use stagehand_core::{AppError, AppResult};
use stagehand_domain::{
    EmailAddress, RecordId, RecordName, User, UserPatch, validate_password,
    validate_password_confirmation,
};

use super::types::{CreateUserRequest, UpdateUserRequest, UserListParams, UserResponse};
use crate::dto::common::{format_timestamp, required_text};

const NAME_LABEL: &str = "name";

impl CreateUserRequest {
    /// Validates the payload into service input.
    pub fn into_input(self) -> AppResult<CreateUserInput> {
        check_password(self.password.as_deref(), self.confirm_password.as_deref())?;

        Ok(CreateUserInput {
            name: RecordName::new(required_text(self.name, NAME_LABEL)?, NAME_LABEL)?,
            email: EmailAddress::new(required_text(self.email, "email")?)?,
            role_id: parse_role_id(required_text(self.role_id, "roleId")?)?,
            is_active: self.is_active,
        })
    }
}

impl UpdateUserRequest {
    /// Validates every supplied field into a partial update.
    pub fn into_patch(self) -> AppResult<UserPatch> {
        check_password(self.password.as_deref(), self.confirm_password.as_deref())?;

        Ok(UserPatch {
            name: self
                .name
                .map(|name| RecordName::new(name, NAME_LABEL))
                .transpose()?,
            email: self.email.map(EmailAddress::new).transpose()?,
            role_id: self.role_id.map(parse_role_id).transpose()?,
            is_active: self.is_active,
        })
    }
}

impl UserListParams {
    /// Converts raw query values into service filters.
    pub fn into_query(self) -> AppResult<UserListQuery> {
        Ok(UserListQuery {
            text: self.q.and_then(|value| value.into_text()),
            role_id: self
                .role_id
                .and_then(|value| value.into_text())
                .map(RecordId::parse)
                .transpose()?,
            is_active: match self.is_active {
                Some(value) => value.into_flag("isActive")?,
                None => None,
            },
        })
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
            role_id: user.role_id().to_string(),
            is_active: user.is_active(),
            created_at: format_timestamp(user.created_at()),
            updated_at: format_timestamp(user.updated_at()),
        }
    }
}

fn parse_role_id(value: String) -> AppResult<RecordId> {
    RecordId::parse(value).map_err(|_| AppError::Validation("roleId is required".to_owned()))
}

/// Applies the password policy when a password accompanies the payload.
fn check_password(password: Option<&str>, confirmation: Option<&str>) -> AppResult<()> {
    match password.filter(|value| !value.trim().is_empty()) {
        Some(password) => {
            validate_password(password)?;
            validate_password_confirmation(password, confirmation)
        }
        None => Ok(()),
    }
}
