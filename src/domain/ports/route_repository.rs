//! Route repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Page, PageRequest, Route, RouteFilter, RouteInput};

/// Repository interface for Route persistence.
#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn create(&self, input: &RouteInput) -> DomainResult<Route>;

    async fn get(&self, id: i64) -> DomainResult<Option<Route>>;

    async fn update(&self, id: i64, input: &RouteInput) -> DomainResult<Route>;

    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// List routes matching every set filter, ordered by id.
    async fn list(&self, filter: &RouteFilter, page: PageRequest) -> DomainResult<Page<Route>>;
}
