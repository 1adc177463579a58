use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

pub fn create_pool(database_path: &str) -> Result<DbPool> {
    // Two processes may hold the store open at once (an editor command
    // next to a watch or serve loop), so every connection waits out short
    // write locks instead of failing.
    let manager = SqliteConnectionManager::file(database_path)
        .with_init(|conn| conn.execute_batch("PRAGMA busy_timeout = 5000;"));
    r2d2::Pool::builder()
        .build(manager)
        .with_context(|| format!("Failed to open board store at {database_path}"))
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to get connection from the store pool")
}
