//! Opening the SQLite database file.

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::domain::models::DatabaseConfig;

/// Writers queue for this long on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Failed to open database: {0}")]
    Open(#[source] sqlx::Error),
    #[error("Failed to create database directory: {0}")]
    Directory(#[source] std::io::Error),
    #[error("Database did not answer: {0}")]
    Unreachable(#[source] sqlx::Error),
}

/// Pool over the configured database file, creating the file and its
/// directory on first use. WAL journal, foreign keys enforced.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, ConnectionError> {
    let path = Path::new(&config.path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(ConnectionError::Directory)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(ConnectionError::Open)
}

/// Single-connection in-memory pool. Every call yields an isolated database.
pub async fn create_test_pool() -> Result<SqlitePool, ConnectionError> {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(ConnectionError::Open)
}

pub async fn verify_connection(pool: &SqlitePool) -> Result<(), ConnectionError> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(ConnectionError::Unreachable)?;
    Ok(())
}
