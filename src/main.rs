//! Airport API CLI entry point.

use clap::Parser;

use airport_api::cli::{self, Cli};
use airport_api::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    let config = match cli::load_config(&cli) {
        Ok(config) => config,
        Err(err) => cli::handle_error(&err, json_mode),
    };

    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => cli::handle_error(&err, json_mode),
    };

    if let Err(err) = cli::run(cli, config).await {
        tracing::error!(error = %err, "command failed");
        cli::handle_error(&err, json_mode);
    }
}
