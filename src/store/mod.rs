pub mod board;
pub mod connection;
pub mod seed;

pub use board::{BoardStore, StoreRevisions};
pub use connection::{create_pool, get_connection, DbConn, DbPool};
