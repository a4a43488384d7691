//! Orders and the tickets they contain.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::flight::{Flight, Seat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: i64,
    pub row: u32,
    pub seat: u32,
    pub flight: Flight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub tickets: Vec<Ticket>,
}

/// A seat requested as part of a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TicketRequest {
    pub row: u32,
    pub seat: u32,
    #[serde(rename = "flight")]
    pub flight_id: i64,
}

impl TicketRequest {
    pub fn seat(&self) -> Seat {
        Seat {
            row: self.row,
            seat: self.seat,
        }
    }
}

/// Index of the first ticket claiming a (flight, row, seat) already claimed
/// earlier in the same request.
pub fn first_duplicate_seat(tickets: &[TicketRequest]) -> Option<usize> {
    let mut seen = HashSet::with_capacity(tickets.len());
    tickets
        .iter()
        .position(|t| !seen.insert((t.flight_id, t.row, t.seat)))
}
