pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pipeline API
        .route("/api/v1/runs", post(handlers::handle_create_run))
        .route("/api/v1/runs", delete(handlers::handle_reset))
        .route("/api/v1/runs/:id", get(handlers::handle_get_run))
        .route(
            "/api/v1/runs/:id/document",
            get(handlers::handle_download_document),
        )
        .with_state(state)
}
