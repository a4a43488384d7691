//! Airports and the routes connecting them.

use serde::{Deserialize, Serialize};

use super::validation::{require_positive, require_text};
use crate::domain::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub id: i64,
    pub name: String,
    pub closest_big_city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AirportInput {
    pub name: String,
    pub closest_big_city: String,
}

impl AirportInput {
    pub fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name, 255)?;
        require_text("closest_big_city", &self.closest_big_city, 255)
    }
}

impl From<&Airport> for AirportInput {
    fn from(airport: &Airport) -> Self {
        Self {
            name: airport.name.clone(),
            closest_big_city: airport.closest_big_city.clone(),
        }
    }
}

/// An airport together with the names of airports it is connected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirportConnections {
    pub airport: Airport,
    /// Destinations of routes leaving this airport.
    pub depart_for: Vec<String>,
    /// Sources of routes arriving at this airport.
    pub accepts_from: Vec<String>,
}

/// A directed route between two airports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: i64,
    pub source: Airport,
    pub destination: Airport,
    pub distance: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteInput {
    pub source_id: i64,
    pub destination_id: i64,
    pub distance: u32,
}

impl RouteInput {
    pub fn validate(&self) -> DomainResult<()> {
        require_positive("distance", self.distance)?;
        if self.source_id == self.destination_id {
            return Err(DomainError::invalid_field(
                "destination",
                "Destination must differ from source",
            ));
        }
        Ok(())
    }
}

impl From<&Route> for RouteInput {
    fn from(route: &Route) -> Self {
        Self {
            source_id: route.source.id,
            destination_id: route.destination.id,
            distance: route.distance,
        }
    }
}

/// Substring filters applied to route listings. Matching is case-insensitive
/// and blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RouteFilter {
    #[serde(default, rename = "s_city")]
    pub source_city: Option<String>,
    #[serde(default, rename = "d_city")]
    pub destination_city: Option<String>,
    #[serde(default, rename = "s_airport")]
    pub source_airport: Option<String>,
    #[serde(default, rename = "d_airport")]
    pub destination_airport: Option<String>,
}

impl RouteFilter {
    /// Drop blank values so adapters only see real filters.
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        Self {
            source_city: keep(self.source_city),
            destination_city: keep(self.destination_city),
            source_airport: keep(self.source_airport),
            destination_airport: keep(self.destination_airport),
        }
    }
}

/// Case folding used for the route search columns and filter values.
/// Full Unicode lowercasing, so `Київ` and `КИЇВ` fold alike.
pub fn fold_case(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_input_rejects_loop() {
        let input = RouteInput {
            source_id: 1,
            destination_id: 1,
            distance: 60,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_route_filter_normalizes_blank_values() {
        let filter = RouteFilter {
            source_city: Some("  ".to_string()),
            destination_city: Some(" la ".to_string()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(filter.source_city, None);
        assert_eq!(filter.destination_city.as_deref(), Some("la"));
    }

    #[test]
    fn test_fold_case_handles_non_ascii() {
        assert_eq!(fold_case("Київ"), fold_case("КИЇВ"));
        assert_eq!(fold_case(" Östersund "), "östersund");
        assert!(fold_case("Åre Östersund").contains(&fold_case("ÖSTER")));
    }
}
