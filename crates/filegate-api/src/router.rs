//! Route definitions for the FileGate HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(file_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Credential exchange and token check
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/token", post(handlers::auth::token))
        .route("/auth/validate-token", get(handlers::auth::validate_token))
}

/// Upload, listing, download
fn file_routes() -> Router<AppState> {
    Router::new()
        // The storage engine enforces the configured upload limit.
        .route(
            "/files/upload",
            post(handlers::file::upload_file).layer(DefaultBodyLimit::disable()),
        )
        .route("/files/list", get(handlers::file::list_files))
        .route("/files/download", get(handlers::file::download_file))
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
