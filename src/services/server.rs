use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use log::info;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::api::status_client::StatusClient;
use crate::config::settings::{database_path, default_status_host, AppConfig};
use crate::feed::ChangeFeed;
use crate::store::BoardStore;

/// The read-only HTTP viewer
pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let store = BoardStore::open(&database_path(), ChangeFeed::new())?;
        let status = StatusClient::new(&self.config.status)?;

        let state = Arc::new(AppState {
            store,
            default_host: default_status_host(),
            status: Mutex::new(status),
        });

        let app = create_router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Viewer API listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
