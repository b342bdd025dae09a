pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::stream::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/schemas/:source", get(handlers::handle_get_schema))
        .route(
            "/api/v1/streams/:source/extract",
            post(handlers::handle_extract),
        )
        .route(
            "/api/v1/streams/:source/replay",
            post(handlers::handle_replay),
        )
        .with_state(state)
}
