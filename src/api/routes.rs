use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{
    board::{get_mapping, get_players},
    status::get_status,
    AppState,
};

/// The read-only viewer surface. Mutations go through the editor commands;
/// the HTTP API never writes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/players", get(get_players))
        .route("/api/mapping", get(get_mapping))
        .route("/api/status", get(get_status))
        .with_state(state)
}
