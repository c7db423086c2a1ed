use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dto::common::QueryValue;

/// Incoming payload for role creation and full replacement.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-request.ts"
)]
pub struct RoleRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
}

/// API representation of a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Query parameters accepted by `GET /roles`.
#[derive(Debug, Default, Deserialize)]
pub struct RoleListParams {
    pub q: Option<QueryValue>,
}
