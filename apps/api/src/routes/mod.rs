pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/doc-types", get(handlers::handle_doc_types))
        .route(
            "/api/v1/documents/generate",
            post(handlers::handle_generate),
        )
        .route(
            "/api/v1/documents/current",
            get(handlers::handle_current).delete(handlers::handle_reset),
        )
        .route("/api/v1/documents/preview", get(handlers::handle_preview))
        .route("/api/v1/documents/export", get(handlers::handle_export))
        .with_state(state)
}
