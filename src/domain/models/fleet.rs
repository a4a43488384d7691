//! Fleet models: airplane types and airplanes.

use serde::{Deserialize, Serialize};

use super::validation::{require_positive, require_text};
use crate::domain::errors::DomainResult;

/// A named class of aircraft, e.g. "Airbus A320".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirplaneType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AirplaneTypeInput {
    pub name: String,
}

impl AirplaneTypeInput {
    pub fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name, 100)
    }
}

/// An airplane with its seat layout.
///
/// Loaded together with its type and the number of flights it is scheduled on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airplane {
    pub id: i64,
    pub name: String,
    pub rows: u32,
    pub seats_in_row: u32,
    /// Path of the uploaded image relative to the media root.
    pub image: Option<String>,
    pub airplane_type: AirplaneType,
    pub used_in_flights: u64,
}

impl Airplane {
    pub fn capacity(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.seats_in_row)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AirplaneInput {
    pub name: String,
    pub rows: u32,
    pub seats_in_row: u32,
    pub airplane_type_id: i64,
}

impl AirplaneInput {
    pub fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name, 255)?;
        require_positive("rows", self.rows)?;
        require_positive("seats_in_row", self.seats_in_row)
    }
}

impl From<&Airplane> for AirplaneInput {
    fn from(airplane: &Airplane) -> Self {
        Self {
            name: airplane.name.clone(),
            rows: airplane.rows,
            seats_in_row: airplane.seats_in_row,
            airplane_type_id: airplane.airplane_type.id,
        }
    }
}

/// Turn a display name into a lowercase ASCII, dash separated file-name fragment.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_airplane() -> Airplane {
        Airplane {
            id: 1,
            name: "Airplane1".to_string(),
            rows: 5,
            seats_in_row: 12,
            image: None,
            airplane_type: AirplaneType {
                id: 1,
                name: "Airplane".to_string(),
            },
            used_in_flights: 0,
        }
    }

    #[test]
    fn test_capacity() {
        assert_eq!(sample_airplane().capacity(), 60);
    }

    #[test]
    fn test_input_validation() {
        let mut input = AirplaneInput::from(&sample_airplane());
        assert!(input.validate().is_ok());

        input.rows = 0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Boeing 747"), "boeing-747");
        assert_eq!(slugify("  Air  Force--One! "), "air-force-one");
        assert_eq!(slugify("???"), "");
    }

    proptest! {
        #[test]
        fn slug_is_file_name_safe(name in ".{0,40}") {
            let slug = slugify(&name);
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
            prop_assert!(slug.chars().all(|c| c == '-' || c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }
}
