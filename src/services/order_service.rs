//! Ticket orders.
//!
//! Placement validates every ticket against its flight before anything is
//! written; the repository then stores the order and its tickets in one
//! transaction, with the seat unique index catching concurrent sales.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::validation::validate_ticket;
use crate::domain::models::{first_duplicate_seat, Flight, Order, Page, PageRequest, TicketRequest};
use crate::domain::ports::{FlightRepository, OrderRepository};

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    flights: Arc<dyn FlightRepository>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, flights: Arc<dyn FlightRepository>) -> Self {
        Self { orders, flights }
    }

    fn ticket_error(index: usize, field: &str, message: impl Into<String>) -> DomainError {
        DomainError::InvalidTicket {
            index,
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Validate the requested tickets against their flights.
    async fn check_tickets(&self, tickets: &[TicketRequest]) -> DomainResult<()> {
        if tickets.is_empty() {
            return Err(DomainError::invalid_field("tickets", "This list may not be empty."));
        }

        let mut flights: HashMap<i64, Flight> = HashMap::new();
        for (index, ticket) in tickets.iter().enumerate() {
            if !flights.contains_key(&ticket.flight_id) {
                let flight = self.flights.get(ticket.flight_id).await?.ok_or_else(|| {
                    Self::ticket_error(
                        index,
                        "flight",
                        format!("Invalid pk \"{}\" - object does not exist.", ticket.flight_id),
                    )
                })?;
                flights.insert(ticket.flight_id, flight);
            }
            let Some(flight) = flights.get(&ticket.flight_id) else {
                continue;
            };

            validate_ticket(
                ticket.row,
                ticket.seat,
                flight.airplane.rows,
                flight.airplane.seats_in_row,
            )
            .map_err(|(field, message)| Self::ticket_error(index, field, message))?;
        }

        if let Some(index) = first_duplicate_seat(tickets) {
            let ticket = &tickets[index];
            return Err(Self::ticket_error(
                index,
                "seat",
                format!(
                    "Seat (row {}, seat {}) is requested more than once for flight {}",
                    ticket.row, ticket.seat, ticket.flight_id
                ),
            ));
        }

        for (index, ticket) in tickets.iter().enumerate() {
            let taken = flights
                .get(&ticket.flight_id)
                .is_some_and(|flight| flight.is_taken(ticket.seat()));
            if taken {
                return Err(Self::ticket_error(
                    index,
                    "seat",
                    format!(
                        "Seat (row {}, seat {}) is already taken on flight {}",
                        ticket.row, ticket.seat, ticket.flight_id
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Place an order for `user_id`. Either every ticket is sold or none is.
    pub async fn place_order(&self, user_id: i64, tickets: &[TicketRequest]) -> DomainResult<Order> {
        if let Err(e) = self.check_tickets(tickets).await {
            tracing::debug!(user_id, ticket_count = tickets.len(), error = %e, "order rejected");
            return Err(e);
        }

        let order = self.orders.create(user_id, tickets).await?;
        tracing::info!(
            order_id = order.id,
            user_id,
            ticket_count = order.tickets.len(),
            "order placed"
        );
        Ok(order)
    }

    pub async fn get_order(&self, user_id: i64, id: i64) -> DomainResult<Order> {
        self.orders
            .get(user_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("order", id))
    }

    pub async fn list_orders(&self, user_id: i64, page: PageRequest) -> DomainResult<Page<Order>> {
        self.orders.list(user_id, page).await
    }
}
