use axum::Router;
use axum::routing::get;
use stagehand_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::request_router::RequestRouter;

mod cors;


/// Builds the HTTP surface: health checks plus the mock families under `/`
/// and `/api`.
pub fn build_router(request_router: RequestRouter, frontend_url: &str) -> Result<Router, AppError> {
    Ok(Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/health", get(handlers::health_handler))
        .fallback(handlers::mock_request_handler)
        .with_state(request_router)
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(TraceLayer::new_for_http()))
}
