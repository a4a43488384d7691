//! Route handlers, grouped by resource.

pub mod crew;
pub mod fleet;
pub mod flights;
pub mod network;
pub mod orders;
pub mod users;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::time::parse_instant;

/// The `ordering` query parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderingParams {
    #[serde(default)]
    pub ordering: Option<String>,
}

/// Response datetime format, e.g. `05 December 26 00:00`.
pub fn format_time(dt: DateTime<Utc>) -> String {
    dt.format("%d %B %y %H:%M").to_string()
}

/// Public URL of a stored media file.
pub fn media_url(path: &str) -> String {
    format!("/media/{path}")
}

/// Take `value` if given, else the current value on a partial update.
/// A full write must supply every field.
pub(crate) fn required<T>(value: Option<T>, current: Option<T>, field: &str) -> DomainResult<T> {
    value
        .or(current)
        .ok_or_else(|| DomainError::invalid_field(field, "This field is required."))
}

pub(crate) fn parse_time(field: &str, raw: &str) -> DomainResult<DateTime<Utc>> {
    parse_instant(raw).ok_or_else(|| {
        DomainError::invalid_field(
            field,
            "Datetime has wrong format. Use one of these formats instead: YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z].",
        )
    })
}
