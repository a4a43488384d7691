//! CLI command implementations.

pub mod create_admin;
pub mod migrate;
pub mod serve;
pub mod wait_for_db;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::adapters::sqlite::create_pool;
use crate::domain::models::Config;

/// Open the configured database without touching its schema.
pub(crate) async fn open_pool(config: &Config) -> Result<SqlitePool> {
    create_pool(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.path))
}
