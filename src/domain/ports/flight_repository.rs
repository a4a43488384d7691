//! Flight repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    Flight, FlightFilter, FlightInput, FlightSortField, Ordering, Page, PageRequest,
};

/// Repository interface for Flight persistence.
///
/// Flights are returned fully loaded: route with airports, airplane with type,
/// crew and the seats already sold.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Insert a flight and its crew assignments atomically.
    async fn create(&self, input: &FlightInput) -> DomainResult<Flight>;

    async fn get(&self, id: i64) -> DomainResult<Option<Flight>>;

    /// Replace a flight's fields and crew assignments atomically.
    async fn update(&self, id: i64, input: &FlightInput) -> DomainResult<Flight>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// List flights matching the filter. Results are ordered by departure
    /// time unless an explicit ordering is given.
    async fn list(
        &self,
        filter: &FlightFilter,
        ordering: Option<&Ordering<FlightSortField>>,
        page: PageRequest,
    ) -> DomainResult<Page<Flight>>;
}
