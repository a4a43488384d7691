//! Airplane repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Airplane, AirplaneInput, AirplaneSortField, Ordering, Page, PageRequest};

/// Repository interface for Airplane persistence.
///
/// Airplanes are always returned with their type and flight count loaded.
#[async_trait]
pub trait AirplaneRepository: Send + Sync {
    async fn create(&self, input: &AirplaneInput) -> DomainResult<Airplane>;

    async fn get(&self, id: i64) -> DomainResult<Option<Airplane>>;

    async fn update(&self, id: i64, input: &AirplaneInput) -> DomainResult<Airplane>;

    /// Replace the stored image path, returning the updated airplane.
    async fn set_image(&self, id: i64, image: Option<&str>) -> DomainResult<Airplane>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// List airplanes. Without an explicit ordering the list is ordered by id.
    async fn list(
        &self,
        ordering: Option<&Ordering<AirplaneSortField>>,
        page: PageRequest,
    ) -> DomainResult<Page<Airplane>>;
}
