pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

/// Encoded resumes travel inline as base64, so bodies get more room than axum's default.
pub const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API (bearer token required)
        .route("/api/skills/analyze", post(handlers::handle_analyze))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
