//! SQLite implementation of the OrderRepository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Flight, Order, Page, PageRequest, Ticket, TicketRequest};
use crate::domain::ports::OrderRepository;

use super::flight_repository::load_flights;
use super::{format_datetime, parse_datetime, placeholders, to_u32, to_u64};

#[derive(Clone)]
pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Attach tickets, each with its fully loaded flight, to order rows.
    async fn hydrate(&self, rows: Vec<OrderRow>) -> DomainResult<Vec<Order>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, order_id, seat_row, seat, flight_id FROM tickets WHERE order_id IN ({}) ORDER BY id",
            placeholders(rows.len())
        );
        let mut query = sqlx::query_as::<_, TicketRow>(&sql);
        for row in &rows {
            query = query.bind(row.id);
        }
        let tickets = query.fetch_all(&self.pool).await?;

        let flight_ids: Vec<i64> = tickets.iter().map(|t| t.flight_id).collect();
        let flights: HashMap<i64, Flight> = load_flights(&self.pool, &flight_ids)
            .await?
            .into_iter()
            .map(|f| (f.id, f))
            .collect();

        let mut by_order: HashMap<i64, Vec<Ticket>> = HashMap::new();
        for ticket in tickets {
            let flight = flights
                .get(&ticket.flight_id)
                .cloned()
                .ok_or_else(|| DomainError::not_found("flight", ticket.flight_id))?;
            by_order.entry(ticket.order_id).or_default().push(Ticket {
                id: ticket.id,
                row: to_u32(ticket.seat_row, "seat_row")?,
                seat: to_u32(ticket.seat, "seat")?,
                flight,
            });
        }

        rows.into_iter()
            .map(|row| {
                Ok(Order {
                    id: row.id,
                    user_id: row.user_id,
                    created_at: parse_datetime(&row.created_at)?,
                    tickets: by_order.remove(&row.id).unwrap_or_default(),
                })
            })
            .collect()
    }
}

/// Translate a failed ticket insert into an error on that ticket.
fn ticket_error(index: usize, ticket: &TicketRequest, err: sqlx::Error) -> DomainError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return DomainError::InvalidTicket {
                index,
                field: "seat".to_string(),
                message: format!(
                    "Seat (row {}, seat {}) is already taken on flight {}",
                    ticket.row, ticket.seat, ticket.flight_id
                ),
            };
        }
        if db_err.is_foreign_key_violation() {
            return DomainError::InvalidTicket {
                index,
                field: "flight".to_string(),
                message: format!("Invalid pk \"{}\" - object does not exist.", ticket.flight_id),
            };
        }
    }
    err.into()
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn create(&self, user_id: i64, tickets: &[TicketRequest]) -> DomainResult<Order> {
        let mut tx = self.pool.begin().await?;

        let order_id = sqlx::query("INSERT INTO orders (user_id, created_at) VALUES (?, ?)")
            .bind(user_id)
            .bind(format_datetime(Utc::now()))
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        for (index, ticket) in tickets.iter().enumerate() {
            sqlx::query("INSERT INTO tickets (seat_row, seat, flight_id, order_id) VALUES (?, ?, ?, ?)")
                .bind(i64::from(ticket.row))
                .bind(i64::from(ticket.seat))
                .bind(ticket.flight_id)
                .bind(order_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| ticket_error(index, ticket, e))?;
        }

        tx.commit().await?;

        self.get(user_id, order_id)
            .await?
            .ok_or_else(|| DomainError::not_found("order", order_id))
    }

    async fn get(&self, user_id: i64, id: i64) -> DomainResult<Option<Order>> {
        let row: Option<OrderRow> =
            sqlx::query_as("SELECT id, user_id, created_at FROM orders WHERE id = ? AND user_id = ?")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![row]).await?.pop())
    }

    async fn list(&self, user_id: i64, page: PageRequest) -> DomainResult<Page<Order>> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        let rows: Vec<OrderRow> = sqlx::query_as(
            "SELECT id, user_id, created_at FROM orders WHERE user_id = ?
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let orders = self.hydrate(rows).await?;
        Page::new(orders, to_u64(count, "count")?, page)
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: i64,
    created_at: String,
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: i64,
    order_id: i64,
    seat_row: i64,
    seat: i64,
    flight_id: i64,
}
