//! Route definitions for the LinkVault HTTP API.
//!
//! Share link routes live under `/access/link`; the health probe sits at the
//! root. The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the Axum router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(access_routes())
        .merge(health_routes())
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

fn access_routes() -> Router<AppState> {
    Router::new()
        .route("/access/link/create", post(handlers::access::create_link))
        .route(
            "/access/link/details/{share_id}",
            get(handlers::access::link_details),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
