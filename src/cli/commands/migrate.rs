//! Implementation of the `airport-api migrate` command.

use anyhow::{Context, Result};

use super::open_pool;
use crate::adapters::sqlite::{all_embedded_migrations, Migrator};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Debug, serde::Serialize)]
pub struct MigrateOutput {
    pub success: bool,
    pub applied: usize,
    pub version: i64,
}

impl CommandOutput for MigrateOutput {
    fn to_human(&self) -> String {
        if self.applied == 0 {
            format!("Database is up to date (schema version {}).", self.version)
        } else {
            format!(
                "Applied {} migration(s); schema version is now {}.",
                self.applied, self.version
            )
        }
    }
}

pub async fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let pool = open_pool(config).await?;
    let migrator = Migrator::new(pool.clone());

    let applied = migrator
        .run_embedded_migrations(all_embedded_migrations())
        .await
        .context("Failed to apply migrations")?;
    let version = migrator
        .get_current_version()
        .await
        .context("Failed to read schema version")?;
    pool.close().await;

    tracing::info!(applied, version, "migrations complete");
    output(
        &MigrateOutput {
            success: true,
            applied,
            version,
        },
        json_mode,
    );
    Ok(())
}
