//! Command-line interface: serving the API and database housekeeping.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use anyhow::Result;

use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

/// Load configuration from `--config` when given, else from the default sources.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Dispatch a parsed command.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config, cli.json).await,
        Commands::Migrate => commands::migrate::execute(&config, cli.json).await,
        Commands::WaitForDb(args) => commands::wait_for_db::execute(args, &config, cli.json).await,
        Commands::CreateAdmin(args) => commands::create_admin::execute(args, &config, cli.json).await,
    }
}

/// Report a failed command and exit non-zero.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        eprintln!("{body}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1)
}
