pub mod form;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::candidate::handlers as candidate;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analysis", post(analysis::handle_analyze))
        .route(
            "/api/v1/analysis/linkedin",
            post(analysis::handle_analyze_url),
        )
        .route(
            "/api/v1/courses/recommend",
            post(analysis::handle_recommend_courses),
        )
        // Candidate API
        .route("/api/v1/candidates", post(candidate::handle_build_profile))
        .route("/api/v1/candidates/chat", post(candidate::handle_chat))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
