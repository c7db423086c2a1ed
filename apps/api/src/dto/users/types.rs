use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dto::common::QueryValue;

/// Incoming payload for user creation.
///
/// `password` and `confirmPassword` are checked against the password policy
/// and then dropped.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-user-request.ts"
)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<String>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Incoming payload for partial user updates; omitted fields are kept.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-user-request.ts"
)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<String>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// API representation of a console user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role_id: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Query parameters accepted by `GET /users`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    pub q: Option<QueryValue>,
    pub role_id: Option<QueryValue>,
    pub is_active: Option<QueryValue>,
}
