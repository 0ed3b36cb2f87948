//! Route definitions for the CaseDesk HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route, threading `AppState` through
/// `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(case_routes())
        .merge(endpoint_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Case records, comments and attachments
fn case_routes() -> Router<AppState> {
    Router::new()
        .route("/cases", post(handlers::case::create_case))
        .route(
            "/cases/{id}",
            get(handlers::case::get_case).put(handlers::case::update_case),
        )
        .route("/cases/{id}/comments", post(handlers::case::append_comment))
        .route(
            "/cases/{id}/attachments",
            post(handlers::case::append_attachments),
        )
}

/// Push endpoint registration
fn endpoint_routes() -> Router<AppState> {
    Router::new()
        .route("/endpoints", post(handlers::endpoint::register_endpoint))
        .route(
            "/endpoints/{token}",
            delete(handlers::endpoint::unregister_endpoint),
        )
}

/// Health probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
