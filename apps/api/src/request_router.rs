//! In-process dispatch of mock requests.
//!
//! Resolves `(method, path)` against the `/users`, `/roles` and
//! `/audit-logs` families, applies the simulated latency and runs exactly
//! one handler. The HTTP transport forwards into the same entry point.

use axum::http::{Method, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};
use stagehand_application::RequestKind;
use stagehand_core::{ActorIdentity, AppError, AppResult};
use stagehand_domain::RecordId;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use crate::handlers;
use crate::state::AppState;


/// One mock request as issued by the console's HTTP client.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Map<String, Value>,
    pub body: Option<Value>,
    /// Actor recorded on audited mutations; the configured default otherwise.
    pub actor: Option<ActorIdentity>,
}

impl ApiRequest {
    /// Creates a request without query, body or explicit actor.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Map::new(),
            body: None,
            actor: None,
        }
    }
}

#[cfg(test)]
impl ApiRequest {
    /// Attaches a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds one query parameter.
    #[must_use]
    pub fn with_query(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.query.insert(name.to_owned(), value.into());
        self
    }
}

/// Successful handler outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: &impl Serialize) -> AppResult<Self> {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn created(body: &impl Serialize) -> AppResult<Self> {
        Self::with_status(StatusCode::CREATED, body)
    }

    fn with_status(status: StatusCode, body: &impl Serialize) -> AppResult<Self> {
        let body = serde_json::to_value(body).map_err(|error| {
            AppError::Internal(format!("failed to serialize response: {error}"))
        })?;

        Ok(Self { status, body })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Users,
    Roles,
    AuditLogs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Collection(Family),
    Item(Family, RecordId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Other,
}

impl From<&Method> for Verb {
    fn from(method: &Method) -> Self {
        if method == Method::GET {
            Self::Get
        } else if method == Method::POST {
            Self::Post
        } else if method == Method::PUT {
            Self::Put
        } else if method == Method::DELETE {
            Self::Delete
        } else {
            Self::Other
        }
    }
}

impl Verb {
    fn request_kind(self) -> RequestKind {
        match self {
            Self::Post | Self::Put => RequestKind::Write,
            Self::Delete => RequestKind::Delete,
            Self::Get | Self::Other => RequestKind::Read,
        }
    }
}

/// Resolves a path to a collection or item target; deeper paths are unmatched.
fn resolve_target(path: &str) -> Option<Target> {
    let trimmed = path.trim_end_matches('/');
    let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
    let segments: Vec<&str> = trimmed.split('/').collect();

    let family = match segments.first().copied()? {
        "users" => Family::Users,
        "roles" => Family::Roles,
        "audit-logs" => Family::AuditLogs,
        _ => return None,
    };

    match segments.as_slice() {
        [_] => Some(Target::Collection(family)),
        [_, id] => RecordId::parse(*id)
            .ok()
            .map(|id| Target::Item(family, id)),
        _ => None,
    }
}

/// Entry point shared by in-process callers and the HTTP transport.
#[derive(Clone)]
pub struct RequestRouter {
    state: AppState,
}

impl RequestRouter {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Dispatches one request to exactly one handler.
    ///
    /// The simulated delay runs first and always completes before a result
    /// is produced.
    pub async fn dispatch(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let request_id = Uuid::new_v4();
        let span = info_span!(
            "mock_request",
            %request_id,
            method = %request.method,
            path = %request.path
        );

        self.route(request).instrument(span).await
    }

    async fn route(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let ApiRequest {
            method,
            path,
            query,
            body,
            actor,
        } = request;
        let verb = Verb::from(&method);
        let actor = actor.unwrap_or_else(|| self.state.default_actor.clone());

        self.state
            .latency_simulator
            .delay(verb.request_kind())
            .await;

        let state = &self.state;
        let result = match (verb, resolve_target(&path)) {
            (Verb::Get, Some(Target::Collection(Family::Users))) => {
                handlers::list_users_handler(state, query).await
            }
            (Verb::Get, Some(Target::Item(Family::Users, id))) => {
                handlers::get_user_handler(state, &id).await
            }
            (Verb::Post, Some(Target::Collection(Family::Users))) => {
                handlers::create_user_handler(state, &actor, body).await
            }
            (Verb::Put, Some(Target::Item(Family::Users, id))) => {
                handlers::update_user_handler(state, &actor, &id, body).await
            }
            (Verb::Delete, Some(Target::Item(Family::Users, id))) => {
                handlers::delete_user_handler(state, &actor, &id).await
            }
            (Verb::Get, Some(Target::Collection(Family::Roles))) => {
                handlers::list_roles_handler(state, query).await
            }
            (Verb::Get, Some(Target::Item(Family::Roles, id))) => {
                handlers::get_role_handler(state, &id).await
            }
            (Verb::Post, Some(Target::Collection(Family::Roles))) => {
                handlers::create_role_handler(state, &actor, body).await
            }
            (Verb::Put, Some(Target::Item(Family::Roles, id))) => {
                handlers::replace_role_handler(state, &actor, &id, body).await
            }
            (Verb::Delete, Some(Target::Item(Family::Roles, id))) => {
                handlers::delete_role_handler(state, &actor, &id).await
            }
            (Verb::Get, Some(Target::Collection(Family::AuditLogs))) => {
                handlers::list_audit_logs_handler(state, query).await
            }
            (Verb::Get, _) => Err(AppError::NotFound(format!("no route for GET {path}"))),
            _ => Err(AppError::BadRequest(format!(
                "unsupported request {method} {path}"
            ))),
        };

        match &result {
            Ok(response) => debug!(status = response.status.as_u16(), "mock request handled"),
            Err(error) => warn!(
                code = error.code(),
                status = error.status(),
                message = error.message(),
                "mock request failed"
            ),
        }

        result
    }
}
