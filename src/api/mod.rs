pub mod handlers;
pub mod models;
pub mod routes;
pub mod status_client;

pub use status_client::{StatusClient, StatusReport};
