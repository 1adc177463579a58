use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, StatusParams};
use crate::api::models::StatusBody;

/// Never an error response: a failed poll renders the offline shape.
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatusParams>,
) -> impl IntoResponse {
    let host = params.host.unwrap_or_else(|| state.default_host.clone());

    let report = state.status.lock().await.fetch(&host).await;

    Json(StatusBody {
        host: report.host,
        online: report.online,
        players_online: report.players_online,
        players_max: report.players_max,
        motd: report.motd,
        checked_at: report.checked_at.to_rfc3339(),
    })
}
