//! Crew repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Crew, CrewInput, Page, PageRequest};

/// Repository interface for Crew persistence.
#[async_trait]
pub trait CrewRepository: Send + Sync {
    async fn create(&self, input: &CrewInput) -> DomainResult<Crew>;

    async fn get(&self, id: i64) -> DomainResult<Option<Crew>>;

    /// Fetch the crew members with the given ids; missing ids are skipped.
    async fn get_many(&self, ids: &[i64]) -> DomainResult<Vec<Crew>>;

    async fn update(&self, id: i64, input: &CrewInput) -> DomainResult<Crew>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    async fn list(&self, page: PageRequest) -> DomainResult<Page<Crew>>;
}
