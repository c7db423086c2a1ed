use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::dto::common::QueryValue;

/// API representation of an audit log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-log-response.ts"
)]
pub struct AuditLogResponse {
    pub id: String,
    pub action: String,
    pub entity: String,
    pub entity_id: String,
    pub actor_id: String,
    pub actor_name: String,
    pub message: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "Record<string, { from: unknown; to: unknown }> | null")]
    pub changes: Option<Value>,
}

/// Query parameters accepted by `GET /audit-logs`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogListParams {
    pub q: Option<QueryValue>,
    pub action: Option<QueryValue>,
    pub entity: Option<QueryValue>,
    pub date_from: Option<QueryValue>,
    pub date_to: Option<QueryValue>,
}
