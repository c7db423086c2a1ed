use serde::{Deserialize, Serialize};
use serde_json::Number;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Acknowledgement returned by delete routes.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/delete-response.ts"
)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// One query-string value.
///
/// In-process callers may pass booleans or numbers, the HTTP layer always
/// passes text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Flag(bool),
    Number(Number),
    Text(String),
}
