//! Order repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Order, Page, PageRequest, TicketRequest};

/// Repository interface for Order persistence.
///
/// Orders are scoped to their owner; lookups for another user's order behave
/// as if the order did not exist.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert an order and all its tickets in one transaction.
    ///
    /// A ticket colliding with an already sold seat fails the whole order with
    /// `DomainError::InvalidTicket` for that ticket's index.
    async fn create(&self, user_id: i64, tickets: &[TicketRequest]) -> DomainResult<Order>;

    async fn get(&self, user_id: i64, id: i64) -> DomainResult<Option<Order>>;

    /// List a user's orders, newest first.
    async fn list(&self, user_id: i64, page: PageRequest) -> DomainResult<Page<Order>>;
}
