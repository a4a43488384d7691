//! API users. Users log in with their email address.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::require_text;
use crate::domain::errors::{DomainError, DomainResult};

pub const MIN_PASSWORD_LENGTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

/// Registration data before the password is hashed.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(skip)]
    pub is_staff: bool,
}

impl NewUser {
    pub fn validate(&self) -> DomainResult<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        validate_names(&self.first_name, &self.last_name)
    }
}

/// Changes a user may apply to their own account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserUpdate {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        validate_names(
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default(),
        )
    }
}

fn validate_email(email: &str) -> DomainResult<()> {
    require_text("email", email, 255)?;
    let mut parts = email.trim().splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(DomainError::invalid_field("email", "Enter a valid email address."));
    }
    Ok(())
}

fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::invalid_field(
            "password",
            format!("Ensure this field has at least {MIN_PASSWORD_LENGTH} characters."),
        ));
    }
    Ok(())
}

fn validate_names(first_name: &str, last_name: &str) -> DomainResult<()> {
    for (field, value) in [("first_name", first_name), ("last_name", last_name)] {
        if value.chars().count() > 150 {
            return Err(DomainError::invalid_field(
                field,
                "Ensure this field has no more than 150 characters.",
            ));
        }
    }
    Ok(())
}

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
