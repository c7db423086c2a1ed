use super::*;

pub async fn list_users_handler(
    state: &AppState,
    query: Map<String, Value>,
) -> AppResult<ApiResponse> {
    let params: UserListParams = decode_query(query)?;
    let users: Vec<UserResponse> = state
        .user_service
        .list_users(&params.into_query()?)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    ApiResponse::ok(&users)
}

pub async fn get_user_handler(state: &AppState, user_id: &RecordId) -> AppResult<ApiResponse> {
    let user = state.user_service.get_user(user_id).await?;

    ApiResponse::ok(&UserResponse::from(user))
}

pub async fn create_user_handler(
    state: &AppState,
    actor: &ActorIdentity,
    body: Option<Value>,
) -> AppResult<ApiResponse> {
    let payload: CreateUserRequest = decode_body(body)?;
    let user = state
        .user_service
        .create_user(actor, payload.into_input()?)
        .await?;

    ApiResponse::created(&UserResponse::from(user))
}

pub async fn update_user_handler(
    state: &AppState,
    actor: &ActorIdentity,
    user_id: &RecordId,
    body: Option<Value>,
) -> AppResult<ApiResponse> {
    let payload: UpdateUserRequest = decode_body(body)?;
    let user = state
        .user_service
        .update_user(actor, user_id, payload.into_patch()?)
        .await?;

    ApiResponse::ok(&UserResponse::from(user))
}

pub async fn delete_user_handler(
    state: &AppState,
    actor: &ActorIdentity,
    user_id: &RecordId,
) -> AppResult<ApiResponse> {
    let acknowledgement = state.user_service.delete_user(actor, user_id).await?;

    ApiResponse::ok(&DeleteResponse::from(acknowledgement))
}
