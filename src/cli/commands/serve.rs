//! Implementation of the `airport-api serve` command.

use anyhow::{Context, Result};
use clap::Args;

use crate::adapters::http::{ApiServer, AppState};
use crate::adapters::sqlite::initialize_database;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::MediaStore;
use crate::services::Services;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides `server.port`)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Debug, serde::Serialize)]
pub struct ServeOutput {
    pub success: bool,
    pub address: String,
}

impl CommandOutput for ServeOutput {
    fn to_human(&self) -> String {
        format!("Server on {} stopped.", self.address)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

pub async fn execute(args: ServeArgs, mut config: Config, json_mode: bool) -> Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let pool = initialize_database(&config.database)
        .await
        .context("Failed to initialize database")?;

    tokio::fs::create_dir_all(&config.media.root)
        .await
        .with_context(|| format!("Failed to create media root {}", config.media.root))?;

    let services = Services::sqlite(
        &pool,
        MediaStore::new(&config.media.root),
        config.media.max_image_bytes,
    );
    let state = AppState {
        services,
        pagination: config.pagination,
    };
    let address = format!("{}:{}", config.server.host, config.server.port);
    let server = ApiServer::new(
        config.server.clone(),
        state,
        &config.media.root,
        config.media.max_image_bytes,
    );

    server
        .serve_with_shutdown(shutdown_signal())
        .await
        .with_context(|| format!("HTTP server on {address} failed"))?;
    pool.close().await;

    output(&ServeOutput { success: true, address }, json_mode);
    Ok(())
}
