use serde::Deserialize;
use tokio::sync::Mutex;

use crate::api::status_client::StatusClient;
use crate::store::BoardStore;

pub mod board;
pub mod status;

pub struct AppState {
    pub store: BoardStore,
    pub default_host: String,
    /// The status client carries rate-limiter state, hence the lock.
    pub status: Mutex<StatusClient>,
}

#[derive(Deserialize)]
pub struct BoardParams {
    pub search: Option<String>,
    pub tier: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

#[derive(Deserialize)]
pub struct StatusParams {
    pub host: Option<String>,
}
