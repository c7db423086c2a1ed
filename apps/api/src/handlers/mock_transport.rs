use std::collections::HashMap;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};

use stagehand_core::AppError;

use super::*;
use crate::error::ApiResult;
use crate::request_router::{ApiRequest, RequestRouter};

const ACTOR_ID_HEADER: &str = "x-actor-id";
const ACTOR_NAME_HEADER: &str = "x-actor-name";

/// Forwards any request outside the static routes to the request router.
pub async fn mock_request_handler(
    State(router): State<RequestRouter>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Query(query) = query.map_err(|rejection| {
        AppError::Validation(format!("invalid query string: {rejection}"))
    })?;

    let body = if body.is_empty() {
        None
    } else {
        Some(serde_json::from_slice::<Value>(&body).map_err(|error| {
            AppError::Validation(format!("malformed JSON body: {error}"))
        })?)
    };

    let mut request = ApiRequest::new(method, strip_api_prefix(uri.path()));
    request.query = query
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    request.body = body;
    request.actor = actor_from_headers(&headers);

    let response = router.dispatch(request).await?;

    Ok((response.status, Json(response.body)))
}

/// Maps `/api/users` onto `/users`; other paths pass through.
fn strip_api_prefix(path: &str) -> &str {
    match path.strip_prefix("/api") {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

fn actor_from_headers(headers: &HeaderMap) -> Option<ActorIdentity> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    Some(ActorIdentity::new(
        header(ACTOR_ID_HEADER)?,
        header(ACTOR_NAME_HEADER)?,
    ))
}
