//! Airports and routes.

use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Airport, AirportConnections, AirportInput, Page, PageRequest, Route, RouteFilter, RouteInput,
};
use crate::domain::ports::{AirportRepository, RouteRepository};

pub struct NetworkService {
    airports: Arc<dyn AirportRepository>,
    routes: Arc<dyn RouteRepository>,
}

impl NetworkService {
    pub fn new(airports: Arc<dyn AirportRepository>, routes: Arc<dyn RouteRepository>) -> Self {
        Self { airports, routes }
    }

    pub async fn create_airport(&self, input: &AirportInput) -> DomainResult<Airport> {
        input.validate()?;
        self.airports.create(input).await
    }

    pub async fn get_airport(&self, id: i64) -> DomainResult<Airport> {
        self.airports
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("airport", id))
    }

    /// An airport with the names of the airports it connects to.
    pub async fn get_airport_connections(&self, id: i64) -> DomainResult<AirportConnections> {
        self.airports
            .get_connections(id)
            .await?
            .ok_or_else(|| DomainError::not_found("airport", id))
    }

    pub async fn update_airport(&self, id: i64, input: &AirportInput) -> DomainResult<Airport> {
        input.validate()?;
        self.airports.update(id, input).await
    }

    pub async fn delete_airport(&self, id: i64) -> DomainResult<()> {
        self.airports.delete(id).await
    }

    pub async fn list_airports(&self, page: PageRequest) -> DomainResult<Page<Airport>> {
        self.airports.list(page).await
    }

    async fn check_route_input(&self, input: &RouteInput) -> DomainResult<()> {
        for (field, id) in [("source", input.source_id), ("destination", input.destination_id)] {
            if self.airports.get(id).await?.is_none() {
                return Err(DomainError::invalid_pk(field, id));
            }
        }
        input.validate()
    }

    fn unique_pair(err: DomainError) -> DomainError {
        match err {
            DomainError::Conflict(_) => DomainError::Conflict(
                "The fields source, destination must make a unique set.".to_string(),
            ),
            other => other,
        }
    }

    pub async fn create_route(&self, input: &RouteInput) -> DomainResult<Route> {
        self.check_route_input(input).await?;
        self.routes.create(input).await.map_err(Self::unique_pair)
    }

    pub async fn get_route(&self, id: i64) -> DomainResult<Route> {
        self.routes
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("route", id))
    }

    pub async fn update_route(&self, id: i64, input: &RouteInput) -> DomainResult<Route> {
        self.check_route_input(input).await?;
        self.routes.update(id, input).await.map_err(Self::unique_pair)
    }

    pub async fn delete_route(&self, id: i64) -> DomainResult<()> {
        self.routes.delete(id).await
    }

    pub async fn list_routes(&self, filter: &RouteFilter, page: PageRequest) -> DomainResult<Page<Route>> {
        self.routes.list(filter, page).await
    }
}
