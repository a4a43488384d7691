//! `/api/airport/flights/` with date filters and ordering.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::crew::CrewResponse;
use super::fleet::AirplaneListItem;
use super::network::RouteListItem;
use super::{format_time, parse_time, required, OrderingParams};
use crate::adapters::http::auth::AuthUser;
use crate::adapters::http::error::ApiResult;
use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::pagination::{PageParams, Paginated};
use crate::adapters::http::AppState;
use crate::domain::errors::DomainResult;
use crate::domain::models::{Flight, FlightFilter, FlightFilterParams, FlightInput, Ordering, Seat};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/airport/flights/", get(list_flights).post(create_flight))
        .route(
            "/api/airport/flights/{id}/",
            get(get_flight)
                .put(put_flight)
                .patch(patch_flight)
                .delete(delete_flight),
        )
}

#[derive(Debug, Default, Deserialize)]
pub struct FlightBody {
    #[serde(default)]
    pub route: Option<i64>,
    #[serde(default)]
    pub airplane: Option<i64>,
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub crew: Option<Vec<i64>>,
}

impl FlightBody {
    fn into_input(self, current: Option<FlightInput>) -> DomainResult<FlightInput> {
        let departure = self
            .departure_time
            .map(|raw| parse_time("departure_time", &raw))
            .transpose()?;
        let arrival = self
            .arrival_time
            .map(|raw| parse_time("arrival_time", &raw))
            .transpose()?;

        let (route, airplane, dep, arr, crew) = match current {
            Some(c) => (
                Some(c.route_id),
                Some(c.airplane_id),
                Some(c.departure_time),
                Some(c.arrival_time),
                Some(c.crew_ids),
            ),
            None => (None, None, None, None, None),
        };
        Ok(FlightInput {
            route_id: required(self.route, route, "route")?,
            airplane_id: required(self.airplane, airplane, "airplane")?,
            departure_time: required(departure, dep, "departure_time")?,
            arrival_time: required(arrival, arr, "arrival_time")?,
            crew_ids: required(self.crew, crew, "crew")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightListItem {
    pub id: i64,
    pub out_of: String,
    pub to: String,
    pub airplane_name: String,
    pub airplane_type: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub tickets_available: i64,
    /// Crew members by full name.
    pub crew: Vec<String>,
}

impl From<Flight> for FlightListItem {
    fn from(f: Flight) -> Self {
        Self {
            id: f.id,
            tickets_available: f.tickets_available(),
            departure_time: format_time(f.departure_time),
            arrival_time: format_time(f.arrival_time),
            crew: f.crew.iter().map(|c| c.full_name()).collect(),
            out_of: f.route.source.name,
            to: f.route.destination.name,
            airplane_name: f.airplane.name,
            airplane_type: f.airplane.airplane_type.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightDetail {
    pub id: i64,
    pub route: RouteListItem,
    pub airplane: AirplaneListItem,
    pub departure_time: String,
    pub arrival_time: String,
    pub crew: Vec<CrewResponse>,
    pub taken_places: Vec<Seat>,
}

impl From<Flight> for FlightDetail {
    fn from(f: Flight) -> Self {
        Self {
            id: f.id,
            route: f.route.into(),
            airplane: f.airplane.into(),
            departure_time: format_time(f.departure_time),
            arrival_time: format_time(f.arrival_time),
            crew: f.crew.into_iter().map(CrewResponse::from).collect(),
            taken_places: f.taken_places,
        }
    }
}

async fn list_flights(
    State(state): State<AppState>,
    _user: AuthUser,
    uri: Uri,
    ApiQuery(params): ApiQuery<PageParams>,
    ApiQuery(filter): ApiQuery<FlightFilterParams>,
    ApiQuery(ordering): ApiQuery<OrderingParams>,
) -> ApiResult<Json<Paginated<FlightListItem>>> {
    let filter = FlightFilter::from_params(&filter)?;
    let ordering = Ordering::from_query(ordering.ordering.as_deref());
    let page = state
        .services
        .flights
        .list(&filter, ordering.as_ref(), params.resolve(state.pagination)?)
        .await?;
    Ok(Json(Paginated::new(page.map(FlightListItem::from), &uri)))
}

async fn create_flight(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(body): ApiJson<FlightBody>,
) -> ApiResult<(StatusCode, Json<FlightDetail>)> {
    user.require_staff()?;
    let created = state.services.flights.create(&body.into_input(None)?).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

async fn get_flight(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<FlightDetail>> {
    Ok(Json(state.services.flights.get(id).await?.into()))
}

async fn save_flight(
    state: &AppState,
    id: i64,
    body: FlightBody,
    partial: bool,
) -> ApiResult<Json<FlightDetail>> {
    let flights = &state.services.flights;
    let current = flights.get(id).await?;
    let input = body.into_input(partial.then(|| FlightInput::from(&current)))?;
    Ok(Json(flights.update(id, &input).await?.into()))
}

async fn put_flight(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<FlightBody>,
) -> ApiResult<Json<FlightDetail>> {
    user.require_staff()?;
    save_flight(&state, id, body, false).await
}

async fn patch_flight(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<FlightBody>,
) -> ApiResult<Json<FlightDetail>> {
    user.require_staff()?;
    save_flight(&state, id, body, true).await
}

async fn delete_flight(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    user.require_staff()?;
    state.services.flights.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
