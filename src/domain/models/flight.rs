//! Scheduled flights and their date filters.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::crew::Crew;
use super::fleet::Airplane;
use super::network::Route;
use super::time::{parse_day, parse_instant, start_of_day};
use super::validation::validate_time;
use crate::domain::errors::{DomainError, DomainResult};

/// A sold place on a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat {
    pub row: u32,
    pub seat: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flight {
    pub id: i64,
    pub route: Route,
    pub airplane: Airplane,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crew: Vec<Crew>,
    /// Seats already sold, ordered by row then seat.
    pub taken_places: Vec<Seat>,
}

impl Flight {
    pub fn tickets_available(&self) -> i64 {
        let capacity = i64::try_from(self.airplane.capacity()).unwrap_or(i64::MAX);
        capacity - self.taken_places.len() as i64
    }

    pub fn is_taken(&self, seat: Seat) -> bool {
        self.taken_places.contains(&seat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightInput {
    pub route_id: i64,
    pub airplane_id: i64,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crew_ids: Vec<i64>,
}

impl FlightInput {
    pub fn validate(&self) -> DomainResult<()> {
        validate_time(self.departure_time, self.arrival_time)
    }
}

impl From<&Flight> for FlightInput {
    fn from(flight: &Flight) -> Self {
        Self {
            route_id: flight.route.id,
            airplane_id: flight.airplane.id,
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
            crew_ids: flight.crew.iter().map(|c| c.id).collect(),
        }
    }
}

/// Raw date filter query parameters as received from clients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightFilterParams {
    #[serde(default)]
    pub departure_day: Option<String>,
    #[serde(default)]
    pub arrival_day: Option<String>,
    #[serde(default)]
    pub departure_start: Option<String>,
    #[serde(default)]
    pub arriving_start: Option<String>,
    #[serde(default)]
    pub departure_end: Option<String>,
    #[serde(default)]
    pub arriving_end: Option<String>,
}

/// A half-open `[start, end)` window in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    pub fn for_day(day: NaiveDate) -> Self {
        let next = day.checked_add_days(Days::new(1)).unwrap_or(day);
        Self {
            start: start_of_day(day),
            end: start_of_day(next),
        }
    }
}

/// Validated flight date filters. All set conditions must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightFilter {
    pub departure_day: Option<DayWindow>,
    pub arrival_day: Option<DayWindow>,
    pub departure_from: Option<DateTime<Utc>>,
    pub arrival_from: Option<DateTime<Utc>>,
    pub departure_until: Option<DateTime<Utc>>,
    pub arrival_until: Option<DateTime<Utc>>,
}

impl FlightFilter {
    pub fn from_params(params: &FlightFilterParams) -> DomainResult<Self> {
        Ok(Self {
            departure_day: day_param("departure_day", params.departure_day.as_deref())?,
            arrival_day: day_param("arrival_day", params.arrival_day.as_deref())?,
            departure_from: instant_param("departure_start", params.departure_start.as_deref())?,
            arrival_from: instant_param("arriving_start", params.arriving_start.as_deref())?,
            departure_until: instant_param("departure_end", params.departure_end.as_deref())?,
            arrival_until: instant_param("arriving_end", params.arriving_end.as_deref())?,
        })
    }
}

fn blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn day_param(name: &str, raw: Option<&str>) -> DomainResult<Option<DayWindow>> {
    blank(raw)
        .map(|value| {
            parse_day(value)
                .or_else(|| parse_instant(value).map(|dt| dt.date_naive()))
                .map(DayWindow::for_day)
                .ok_or_else(|| DomainError::invalid_field(name, format!("Invalid date: {value}")))
        })
        .transpose()
}

fn instant_param(name: &str, raw: Option<&str>) -> DomainResult<Option<DateTime<Utc>>> {
    blank(raw)
        .map(|value| {
            parse_instant(value)
                .ok_or_else(|| DomainError::invalid_field(name, format!("Invalid date: {value}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 12, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_params_give_empty_filter() {
        let params = FlightFilterParams {
            departure_day: Some(String::new()),
            arriving_end: Some("   ".to_string()),
            ..Default::default()
        };
        let filter = FlightFilter::from_params(&params).unwrap();
        assert_eq!(filter, FlightFilter::default());
    }

    #[test]
    fn test_departure_day_window() {
        let params = FlightFilterParams {
            departure_day: Some("2026-12-05".to_string()),
            ..Default::default()
        };
        let filter = FlightFilter::from_params(&params).unwrap();
        assert_eq!(
            filter.departure_day,
            Some(DayWindow {
                start: at(5, 0),
                end: at(6, 0),
            })
        );
        assert_eq!(filter.arrival_day, None);
    }

    #[test]
    fn test_day_filter_accepts_timestamp() {
        let params = FlightFilterParams {
            arrival_day: Some("2026-12-05T17:30".to_string()),
            ..Default::default()
        };
        let filter = FlightFilter::from_params(&params).unwrap();
        assert_eq!(filter.arrival_day, Some(DayWindow::for_day(at(5, 0).date_naive())));
    }

    #[test]
    fn test_bare_dates_mean_midnight() {
        let params = FlightFilterParams {
            departure_start: Some("2026-12-08".to_string()),
            arriving_end: Some("2026-12-11T06:00:00Z".to_string()),
            ..Default::default()
        };
        let filter = FlightFilter::from_params(&params).unwrap();
        assert_eq!(filter.departure_from, Some(at(8, 0)));
        assert_eq!(filter.arrival_until, Some(at(11, 6)));
        assert_eq!(filter.departure_until, None);
    }

    #[test]
    fn test_invalid_param_names_the_field() {
        let params = FlightFilterParams {
            arriving_start: Some("soon".to_string()),
            ..Default::default()
        };
        match FlightFilter::from_params(&params).unwrap_err() {
            DomainError::InvalidField { field, .. } => assert_eq!(field, "arriving_start"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
