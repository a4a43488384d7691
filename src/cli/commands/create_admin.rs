//! Implementation of the `airport-api create-admin` command.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use crate::adapters::sqlite::{all_embedded_migrations, Migrator, SqliteUserRepository};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, NewUser};
use crate::services::UserService;

use super::open_pool;

#[derive(Args, Debug)]
pub struct CreateAdminArgs {
    /// Login email of the new staff user
    #[arg(long)]
    pub email: String,

    /// Password (at least 5 characters)
    #[arg(long, env = "AIRPORT_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,
}

#[derive(Debug, serde::Serialize)]
pub struct CreateAdminOutput {
    pub success: bool,
    pub id: i64,
    pub email: String,
}

impl CommandOutput for CreateAdminOutput {
    fn to_human(&self) -> String {
        format!("Created staff user {} (id {}).", self.email, self.id)
    }
}

pub async fn execute(args: CreateAdminArgs, config: &Config, json_mode: bool) -> Result<()> {
    let pool = open_pool(config).await?;
    Migrator::new(pool.clone())
        .run_embedded_migrations(all_embedded_migrations())
        .await
        .context("Failed to apply migrations")?;

    let users = UserService::new(Arc::new(SqliteUserRepository::new(pool.clone())));
    let user = users
        .create_admin(NewUser {
            email: args.email,
            password: args.password,
            first_name: args.first_name,
            last_name: args.last_name,
            is_staff: true,
        })
        .await
        .context("Failed to create staff user")?;
    pool.close().await;

    output(
        &CreateAdminOutput {
            success: true,
            id: user.id,
            email: user.email,
        },
        json_mode,
    );
    Ok(())
}
