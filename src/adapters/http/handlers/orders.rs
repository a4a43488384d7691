//! `/api/airport/my_orders/`: the caller's own orders.
//!
//! Orders are immutable once placed, so only list, retrieve and create are
//! routed; other methods answer 405.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::flights::{FlightDetail, FlightListItem};
use super::{format_time, required};
use crate::adapters::http::auth::AuthUser;
use crate::adapters::http::error::ApiResult;
use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::pagination::{PageParams, Paginated};
use crate::adapters::http::AppState;
use crate::domain::models::{Flight, Order, TicketRequest};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/airport/my_orders/", get(list_orders).post(create_order))
        .route("/api/airport/my_orders/{id}/", get(get_order))
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderBody {
    #[serde(default)]
    pub tickets: Option<Vec<TicketRequest>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketView<F> {
    pub id: i64,
    pub row: u32,
    pub seat: u32,
    pub flight: F,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView<F> {
    pub id: i64,
    pub created_at: String,
    pub tickets: Vec<TicketView<F>>,
}

impl<F: From<Flight>> From<Order> for OrderView<F> {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            created_at: format_time(order.created_at),
            tickets: order
                .tickets
                .into_iter()
                .map(|t| TicketView {
                    id: t.id,
                    row: t.row,
                    seat: t.seat,
                    flight: t.flight.into(),
                })
                .collect(),
        }
    }
}

pub type OrderListItem = OrderView<FlightListItem>;
pub type OrderDetail = OrderView<FlightDetail>;

async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    uri: Uri,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Paginated<OrderListItem>>> {
    let page = state
        .services
        .orders
        .list_orders(user.id(), params.resolve(state.pagination)?)
        .await?;
    Ok(Json(Paginated::new(page.map(OrderListItem::from), &uri)))
}

async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(body): ApiJson<OrderBody>,
) -> ApiResult<(StatusCode, Json<OrderDetail>)> {
    let tickets = required(body.tickets, None, "tickets")?;
    let order = state.services.orders.place_order(user.id(), &tickets).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<OrderDetail>> {
    Ok(Json(state.services.orders.get_order(user.id(), id).await?.into()))
}
