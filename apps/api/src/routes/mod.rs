pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::candidates::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/candidates", get(handlers::handle_list_candidates))
        .route("/api/v1/candidates/upload", post(handlers::handle_upload))
        .route(
            "/api/v1/candidates/:id/select",
            post(handlers::handle_select_candidate),
        )
        .route(
            "/api/v1/candidates/auto-select",
            post(handlers::handle_auto_select),
        )
        .route(
            "/api/v1/candidates/selected",
            get(handlers::handle_selected),
        )
        .with_state(state)
}
