//! Airport repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Airport, AirportConnections, AirportInput, Page, PageRequest};

/// Repository interface for Airport persistence.
#[async_trait]
pub trait AirportRepository: Send + Sync {
    async fn create(&self, input: &AirportInput) -> DomainResult<Airport>;

    async fn get(&self, id: i64) -> DomainResult<Option<Airport>>;

    /// Get an airport with the names of the airports its routes connect to.
    async fn get_connections(&self, id: i64) -> DomainResult<Option<AirportConnections>>;

    async fn update(&self, id: i64, input: &AirportInput) -> DomainResult<Airport>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    async fn list(&self, page: PageRequest) -> DomainResult<Page<Airport>>;
}
