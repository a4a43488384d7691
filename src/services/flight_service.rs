//! Flight scheduling.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Flight, FlightFilter, FlightInput, FlightSortField, Ordering, Page, PageRequest,
};
use crate::domain::ports::{AirplaneRepository, CrewRepository, FlightRepository, RouteRepository};

pub struct FlightService {
    flights: Arc<dyn FlightRepository>,
    routes: Arc<dyn RouteRepository>,
    airplanes: Arc<dyn AirplaneRepository>,
    crew: Arc<dyn CrewRepository>,
}

impl FlightService {
    pub fn new(
        flights: Arc<dyn FlightRepository>,
        routes: Arc<dyn RouteRepository>,
        airplanes: Arc<dyn AirplaneRepository>,
        crew: Arc<dyn CrewRepository>,
    ) -> Self {
        Self {
            flights,
            routes,
            airplanes,
            crew,
        }
    }

    /// Check times and that every referenced row exists.
    async fn check_input(&self, input: &FlightInput) -> DomainResult<()> {
        if self.routes.get(input.route_id).await?.is_none() {
            return Err(DomainError::invalid_pk("route", input.route_id));
        }
        if self.airplanes.get(input.airplane_id).await?.is_none() {
            return Err(DomainError::invalid_pk("airplane", input.airplane_id));
        }

        let requested: BTreeSet<i64> = input.crew_ids.iter().copied().collect();
        let found: BTreeSet<i64> = self
            .crew
            .get_many(&input.crew_ids)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();
        if let Some(missing) = requested.difference(&found).next() {
            return Err(DomainError::invalid_pk("crew", *missing));
        }

        input.validate()
    }

    pub async fn create(&self, input: &FlightInput) -> DomainResult<Flight> {
        self.check_input(input).await?;
        let flight = self.flights.create(input).await?;
        tracing::info!(
            flight_id = flight.id,
            route_id = input.route_id,
            airplane_id = input.airplane_id,
            crew = input.crew_ids.len(),
            "flight scheduled"
        );
        Ok(flight)
    }

    pub async fn get(&self, id: i64) -> DomainResult<Flight> {
        self.flights
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("flight", id))
    }

    pub async fn update(&self, id: i64, input: &FlightInput) -> DomainResult<Flight> {
        self.check_input(input).await?;
        let flight = self.flights.update(id, input).await?;
        tracing::info!(flight_id = id, "flight updated");
        Ok(flight)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.flights.delete(id).await?;
        tracing::info!(flight_id = id, "flight cancelled");
        Ok(())
    }

    pub async fn list(
        &self,
        filter: &FlightFilter,
        ordering: Option<&Ordering<FlightSortField>>,
        page: PageRequest,
    ) -> DomainResult<Page<Flight>> {
        self.flights.list(filter, ordering, page).await
    }
}
