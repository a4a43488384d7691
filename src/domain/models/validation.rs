//! Field validators shared by the booking models.

use chrono::{DateTime, Utc};

use crate::domain::errors::{DomainError, DomainResult};

/// Default upper bound for uploaded airplane images (1 MiB).
pub const MAX_IMAGE_BYTES: u64 = 1024 * 1024;

/// Departure must not be later than arrival.
pub fn validate_time(departure_time: DateTime<Utc>, arrival_time: DateTime<Utc>) -> DomainResult<()> {
    if departure_time > arrival_time {
        return Err(DomainError::invalid_field(
            "departure_time",
            "Departure time cannot be later than arrival time",
        ));
    }
    Ok(())
}

/// Check a ticket's row and seat against the airplane layout.
///
/// Returns the offending field name and a message so callers can attach the
/// ticket position when reporting.
pub fn validate_ticket(row: u32, seat: u32, rows: u32, seats_in_row: u32) -> Result<(), (&'static str, String)> {
    for (value, field, max) in [(row, "row", rows), (seat, "seat", seats_in_row)] {
        if value == 0 || value > max {
            return Err((field, format!("{field} must be in range: (1, {max})")));
        }
    }
    Ok(())
}

pub fn validate_image_size(size: u64, max_bytes: u64) -> DomainResult<()> {
    if size > max_bytes {
        let limit_mb = max_bytes as f64 / (1024.0 * 1024.0);
        return Err(DomainError::invalid_field(
            "image",
            format!("The maximum image size that can be uploaded is {limit_mb} MB"),
        ));
    }
    Ok(())
}

/// Require a non-blank string no longer than `max_len` characters.
pub fn require_text(field: &str, value: &str, max_len: usize) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_field(field, "This field may not be blank."));
    }
    if value.chars().count() > max_len {
        return Err(DomainError::invalid_field(
            field,
            format!("Ensure this field has no more than {max_len} characters."),
        ));
    }
    Ok(())
}

pub fn require_positive(field: &str, value: u32) -> DomainResult<()> {
    if value == 0 {
        return Err(DomainError::invalid_field(
            field,
            "Ensure this value is greater than or equal to 1.",
        ));
    }
    Ok(())
}
