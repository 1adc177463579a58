use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, BoardParams};
use crate::api::models::{BoardResponse, MappingEntry, MappingResponse, PlayerRow};
use crate::view::{visible_rows, ViewQuery};

/// Every request re-reads the store: the HTTP viewer is just another
/// idempotent consumer of authoritative state.
pub async fn get_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BoardParams>,
) -> impl IntoResponse {
    let query = build_query(&params);

    let players = match state.store.load_players() {
        Ok(players) => players,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Store error: {e}"))
                .into_response()
        }
    };

    let items: Vec<PlayerRow> = visible_rows(&players, &query)
        .into_iter()
        .map(|(index, player)| PlayerRow {
            index,
            rank: player.rank,
            name: player.name.clone(),
            tier: player.tier.clone(),
            points: player.points,
        })
        .collect();

    let total = items.len();
    Json(BoardResponse { items, total }).into_response()
}

pub async fn get_mapping(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mapping = match state.store.load_mapping() {
        Ok(mapping) => mapping,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Store error: {e}"))
                .into_response()
        }
    };

    let entries = mapping
        .iter_ladder()
        .into_iter()
        .map(|(tier, points)| MappingEntry {
            tier: tier.to_string(),
            points,
        })
        .collect();

    Json(MappingResponse { entries }).into_response()
}

fn build_query(params: &BoardParams) -> ViewQuery {
    ViewQuery::from_params(
        params.search.as_deref(),
        params.tier.as_deref(),
        params.sort_by.as_deref(),
        params.order.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{SortDirection, SortField, SortState};

    #[test]
    fn query_defaults_to_rank_ascending() {
        let query = build_query(&BoardParams {
            search: None,
            tier: None,
            sort_by: None,
            order: None,
        });
        assert_eq!(query.sort, SortState::default());
        assert!(query.search.is_empty());
        assert!(query.tier_filter.is_empty());
    }

    #[test]
    fn unknown_sort_params_fall_back_to_the_default() {
        let query = build_query(&BoardParams {
            search: Some("vex".to_string()),
            tier: Some("HT1".to_string()),
            sort_by: Some("elo".to_string()),
            order: Some("sideways".to_string()),
        });
        assert_eq!(query.sort.field, SortField::Rank);
        assert_eq!(query.sort.direction, SortDirection::Ascending);
        assert_eq!(query.search, "vex");
        assert_eq!(query.tier_filter, "HT1");
    }

    #[test]
    fn explicit_sort_params_are_honored() {
        let query = build_query(&BoardParams {
            search: None,
            tier: None,
            sort_by: Some("points".to_string()),
            order: Some("desc".to_string()),
        });
        assert_eq!(query.sort.field, SortField::Points);
        assert_eq!(query.sort.direction, SortDirection::Descending);
    }
}
