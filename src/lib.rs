//! Airport API - airline ticket booking backend
//!
//! A REST service for managing a fleet, airports, routes, crew and flights,
//! and for selling tickets on those flights.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, validation rules and repository ports
//! - **Service Layer** (`services`): booking operations over the ports
//! - **Adapters** (`adapters`): SQLite repositories and the axum HTTP API
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging,
//!   credentials and media storage
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use airport_api::adapters::http::{ApiServer, AppState};
//! use airport_api::adapters::sqlite::initialize_database;
//! use airport_api::infrastructure::{ConfigLoader, MediaStore};
//! use airport_api::services::Services;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let pool = initialize_database(&config.database).await?;
//!     let services = Services::sqlite(&pool, MediaStore::new(&config.media.root), config.media.max_image_bytes);
//!     let state = AppState { services, pagination: config.pagination };
//!     ApiServer::new(config.server, state, &config.media.root, config.media.max_image_bytes)
//!         .serve_with_shutdown(async { let _ = tokio::signal::ctrl_c().await; })
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{Config, DatabaseConfig, LoggingConfig, MediaConfig, PaginationConfig, ServerConfig};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::Services;
