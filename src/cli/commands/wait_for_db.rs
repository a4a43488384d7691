//! Implementation of the `airport-api wait-for-db` command.
//!
//! Used by container entrypoints to hold the API back until the database
//! file is reachable.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use backoff::ExponentialBackoffBuilder;
use clap::Args;

use crate::adapters::sqlite::{create_pool, verify_connection, ConnectionError};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, DatabaseConfig};

#[derive(Args, Debug)]
pub struct WaitForDbArgs {
    /// Give up after this many attempts
    #[arg(long, default_value = "30")]
    pub retries: u32,

    /// Seconds to wait between attempts
    #[arg(long, default_value = "1")]
    pub delay_secs: u64,
}

#[derive(Debug, serde::Serialize)]
pub struct WaitForDbOutput {
    pub success: bool,
    pub attempts: u32,
}

impl CommandOutput for WaitForDbOutput {
    fn to_human(&self) -> String {
        format!("Database available! ({} attempt(s))", self.attempts)
    }
}

async fn try_connect(database: &DatabaseConfig) -> Result<(), ConnectionError> {
    let pool = create_pool(database).await?;
    let result = verify_connection(&pool).await;
    pool.close().await;
    result
}

pub async fn execute(args: WaitForDbArgs, config: &Config, json_mode: bool) -> Result<()> {
    let database = DatabaseConfig {
        max_connections: 1,
        ..config.database.clone()
    };
    let retries = args.retries.max(1);
    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_secs(args.delay_secs))
        .with_multiplier(1.0)
        .with_randomization_factor(0.0)
        .with_max_elapsed_time(None)
        .build();

    let attempts = AtomicU32::new(0);
    backoff::future::retry_notify(
        policy,
        || {
            let attempts = &attempts;
            let database = &database;
            async move {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                match try_connect(database).await {
                    Ok(()) => Ok(()),
                    Err(e) if attempt >= retries => Err(backoff::Error::permanent(e)),
                    Err(e) => Err(backoff::Error::transient(e)),
                }
            }
        },
        |err: ConnectionError, wait: Duration| {
            tracing::warn!(error = %err, wait_secs = wait.as_secs(), "database unavailable, waiting");
        },
    )
    .await
    .with_context(|| format!("Database still unavailable after {retries} attempt(s)"))?;

    output(
        &WaitForDbOutput {
            success: true,
            attempts: attempts.load(Ordering::SeqCst),
        },
        json_mode,
    );
    Ok(())
}
