//! SQLite database adapters for the airport booking API.

pub mod airplane_repository;
pub mod airplane_type_repository;
pub mod airport_repository;
pub mod connection;
pub mod crew_repository;
pub mod flight_repository;
pub mod migrations;
pub mod order_repository;
pub mod route_repository;
pub mod user_repository;

pub use airplane_repository::SqliteAirplaneRepository;
pub use airplane_type_repository::SqliteAirplaneTypeRepository;
pub use airport_repository::SqliteAirportRepository;
pub use connection::{create_pool, create_test_pool, verify_connection, ConnectionError};
pub use crew_repository::SqliteCrewRepository;
pub use flight_repository::SqliteFlightRepository;
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};
pub use order_repository::SqliteOrderRepository;
pub use route_repository::SqliteRouteRepository;
pub use user_repository::SqliteUserRepository;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{DatabaseConfig, Ordering, SortField};

/// Format a timestamp the way it is stored: RFC 3339, whole seconds, `Z`.
///
/// The fixed width keeps lexicographic and chronological order identical,
/// which the date filters rely on.
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an RFC3339 datetime string from a SQLite row field.
pub fn parse_datetime(s: &str) -> DomainResult<DateTime<Utc>> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| DomainError::SerializationError(e.to_string()))
        .map(|dt| dt.with_timezone(&Utc))
}

/// Convert a stored integer into a non-negative `u32`.
pub fn to_u32(value: i64, column: &str) -> DomainResult<u32> {
    u32::try_from(value)
        .map_err(|_| DomainError::SerializationError(format!("{column} out of range: {value}")))
}

pub fn to_u64(value: i64, column: &str) -> DomainResult<u64> {
    u64::try_from(value)
        .map_err(|_| DomainError::SerializationError(format!("{column} out of range: {value}")))
}

/// `?, ?, ?` for an `IN (...)` clause of `n` values.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Render an `ORDER BY` body for `ordering`, with `tie_breaker` appended
/// ascending unless it is already one of the terms.
pub fn order_by_clause<F: SortField>(
    ordering: &Ordering<F>,
    column: impl Fn(F) -> &'static str,
    tie_breaker: &'static str,
) -> String {
    let mut terms: Vec<String> = ordering
        .terms()
        .iter()
        .map(|term| {
            let direction = if term.descending { "DESC" } else { "ASC" };
            format!("{} {direction}", column(term.field))
        })
        .collect();
    if !ordering.terms().iter().any(|t| column(t.field) == tie_breaker) {
        terms.push(format!("{tie_breaker} ASC"));
    }
    terms.join(", ")
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),
}

pub async fn initialize_database(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    let pool = create_pool(config).await?;
    let migrator = Migrator::new(pool.clone());
    let applied = migrator.run_embedded_migrations(all_embedded_migrations()).await?;
    if applied > 0 {
        tracing::info!(applied, "database migrations applied");
    }
    Ok(pool)
}

/// Create an in-memory test pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    let migrator = Migrator::new(pool.clone());
    migrator.run_embedded_migrations(all_embedded_migrations()).await?;
    Ok(pool)
}
