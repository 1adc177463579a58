pub mod models;

pub use models::{PlayerRecord, TierMapping};
