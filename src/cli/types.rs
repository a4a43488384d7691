//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::create_admin::CreateAdminArgs;
use super::commands::serve::ServeArgs;
use super::commands::wait_for_db::WaitForDbArgs;

#[derive(Parser, Debug)]
#[command(name = "airport-api")]
#[command(about = "Airport API - airline ticket booking backend", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to airport.yaml + airport.local.yaml + AIRPORT_* env)
    #[arg(short, long, global = true, env = "AIRPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),

    /// Apply pending database migrations
    Migrate,

    /// Block until the database accepts connections
    WaitForDb(WaitForDbArgs),

    /// Create a staff user
    CreateAdmin(CreateAdminArgs),
}
