//! Axum router construction.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled so the browser client can call the API cross-origin.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `POST /api/interactions` -- record one interaction
/// - `GET /api/platform/state` -- platform state singleton
/// - `GET /api/platform/changelog` -- changelog entries
/// - `GET /health` -- liveness probe
///
/// CORS allows any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/interactions", post(handlers::record_interaction))
        .route("/api/platform/state", get(handlers::platform_state))
        .route("/api/platform/changelog", get(handlers::changelog))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
