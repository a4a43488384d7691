//! Domain errors for the airport booking API.

use thiserror::Error;

/// Domain-level errors that can occur while handling bookings and fleet data.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Invalid ticket #{index} {field}: {message}")]
    InvalidTicket {
        index: usize,
        field: String,
        message: String,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid page.")]
    InvalidPage,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// A relation field pointing at a row that does not exist.
    pub fn invalid_pk(field: impl Into<String>, id: i64) -> Self {
        Self::invalid_field(field, format!("Invalid pk \"{id}\" - object does not exist."))
    }
}

/// Client-facing text for a unique index failure, keyed on the table SQLite
/// names in its `UNIQUE constraint failed: <table>.<column>` message.
fn unique_violation_message(db_message: &str) -> &'static str {
    let table = db_message
        .rsplit(": ")
        .next()
        .and_then(|columns| columns.split('.').next())
        .unwrap_or_default();
    match table {
        "airplane_types" => "airplane type with this name already exists.",
        "routes" => "The fields source, destination must make a unique set.",
        "users" => "user with this email already exists.",
        "tickets" => "The fields row, seat, flight must make a unique set.",
        _ => "An object with these values already exists.",
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return DomainError::Conflict(
                    unique_violation_message(db_err.message()).to_string(),
                );
            }
            if db_err.is_foreign_key_violation() {
                return DomainError::ValidationFailed(
                    "referenced object does not exist".to_string(),
                );
            }
        }
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::StorageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_message_hides_schema() {
        assert_eq!(
            unique_violation_message("UNIQUE constraint failed: airplane_types.name"),
            "airplane type with this name already exists."
        );
        assert_eq!(
            unique_violation_message(
                "UNIQUE constraint failed: routes.source_id, routes.destination_id"
            ),
            "The fields source, destination must make a unique set."
        );
        assert_eq!(
            unique_violation_message("UNIQUE constraint failed: auth_tokens.user_id"),
            "An object with these values already exists."
        );
        assert_eq!(
            unique_violation_message("garbled"),
            "An object with these values already exists."
        );
    }
}
