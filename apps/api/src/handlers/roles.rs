use super::*;

pub async fn list_roles_handler(
    state: &AppState,
    query: Map<String, Value>,
) -> AppResult<ApiResponse> {
    let params: RoleListParams = decode_query(query)?;
    let roles: Vec<RoleResponse> = state
        .role_service
        .list_roles(&params.into_query())
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    ApiResponse::ok(&roles)
}

pub async fn get_role_handler(state: &AppState, role_id: &RecordId) -> AppResult<ApiResponse> {
    let role = state.role_service.get_role(role_id).await?;

    ApiResponse::ok(&RoleResponse::from(role))
}

pub async fn create_role_handler(
    state: &AppState,
    actor: &ActorIdentity,
    body: Option<Value>,
) -> AppResult<ApiResponse> {
    let payload: RoleRequest = decode_body(body)?;
    let role = state
        .role_service
        .create_role(actor, payload.into_draft()?)
        .await?;

    ApiResponse::created(&RoleResponse::from(role))
}

pub async fn replace_role_handler(
    state: &AppState,
    actor: &ActorIdentity,
    role_id: &RecordId,
    body: Option<Value>,
) -> AppResult<ApiResponse> {
    let payload: RoleRequest = decode_body(body)?;
    let role = state
        .role_service
        .replace_role(actor, role_id, payload.into_draft()?)
        .await?;

    ApiResponse::ok(&RoleResponse::from(role))
}

pub async fn delete_role_handler(
    state: &AppState,
    actor: &ActorIdentity,
    role_id: &RecordId,
) -> AppResult<ApiResponse> {
    let acknowledgement = state.role_service.delete_role(actor, role_id).await?;

    ApiResponse::ok(&DeleteResponse::from(acknowledgement))
}
