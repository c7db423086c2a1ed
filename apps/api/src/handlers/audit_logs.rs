use super::*;

pub async fn list_audit_logs_handler(
    state: &AppState,
    query: Map<String, Value>,
) -> AppResult<ApiResponse> {
    let params: AuditLogListParams = decode_query(query)?;
    let entries: Vec<AuditLogResponse> = state
        .audit_log_service
        .list_entries(&params.into_query()?)
        .await?
        .into_iter()
        .map(AuditLogResponse::from)
        .collect();

    ApiResponse::ok(&entries)
}
