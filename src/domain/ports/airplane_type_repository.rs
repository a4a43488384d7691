//! Airplane type repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AirplaneType, AirplaneTypeInput, Page, PageRequest};

/// Repository interface for AirplaneType persistence.
#[async_trait]
pub trait AirplaneTypeRepository: Send + Sync {
    async fn create(&self, input: &AirplaneTypeInput) -> DomainResult<AirplaneType>;

    async fn get(&self, id: i64) -> DomainResult<Option<AirplaneType>>;

    async fn update(&self, id: i64, input: &AirplaneTypeInput) -> DomainResult<AirplaneType>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// List airplane types ordered by id.
    async fn list(&self, page: PageRequest) -> DomainResult<Page<AirplaneType>>;
}
