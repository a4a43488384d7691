//! `/api/airport/airports/` and `/api/airport/routes/`.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::required;
use crate::adapters::http::auth::AuthUser;
use crate::adapters::http::error::ApiResult;
use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::pagination::{PageParams, Paginated};
use crate::adapters::http::AppState;
use crate::domain::errors::DomainResult;
use crate::domain::models::{Airport, AirportConnections, AirportInput, Route, RouteFilter, RouteInput};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/airport/airports/", get(list_airports).post(create_airport))
        .route(
            "/api/airport/airports/{id}/",
            get(get_airport)
                .put(put_airport)
                .patch(patch_airport)
                .delete(delete_airport),
        )
        .route("/api/airport/routes/", get(list_routes).post(create_route))
        .route(
            "/api/airport/routes/{id}/",
            get(get_route).put(put_route).patch(patch_route).delete(delete_route),
        )
}

#[derive(Debug, Default, Deserialize)]
pub struct AirportBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub closest_big_city: Option<String>,
}

impl AirportBody {
    fn into_input(self, current: Option<AirportInput>) -> DomainResult<AirportInput> {
        let (name, city) = match current {
            Some(c) => (Some(c.name), Some(c.closest_big_city)),
            None => (None, None),
        };
        Ok(AirportInput {
            name: required(self.name, name, "name")?,
            closest_big_city: required(self.closest_big_city, city, "closest_big_city")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AirportDetail {
    pub id: i64,
    pub name: String,
    pub closest_big_city: String,
    pub depart_for: Vec<String>,
    pub accepts_from: Vec<String>,
}

impl From<AirportConnections> for AirportDetail {
    fn from(c: AirportConnections) -> Self {
        Self {
            id: c.airport.id,
            name: c.airport.name,
            closest_big_city: c.airport.closest_big_city,
            depart_for: c.depart_for,
            accepts_from: c.accepts_from,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RouteBody {
    #[serde(default)]
    pub source: Option<i64>,
    #[serde(default)]
    pub destination: Option<i64>,
    #[serde(default)]
    pub distance: Option<u32>,
}

impl RouteBody {
    fn into_input(self, current: Option<RouteInput>) -> DomainResult<RouteInput> {
        let (source, destination, distance) = match current {
            Some(c) => (Some(c.source_id), Some(c.destination_id), Some(c.distance)),
            None => (None, None, None),
        };
        Ok(RouteInput {
            source_id: required(self.source, source, "source")?,
            destination_id: required(self.destination, destination, "destination")?,
            distance: required(self.distance, distance, "distance")?,
        })
    }
}

/// Route in listings: airports are shown by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteListItem {
    pub id: i64,
    pub source: String,
    pub destination: String,
    pub distance: u32,
}

impl From<Route> for RouteListItem {
    fn from(r: Route) -> Self {
        Self {
            id: r.id,
            source: r.source.name,
            destination: r.destination.name,
            distance: r.distance,
        }
    }
}

async fn list_airports(
    State(state): State<AppState>,
    _user: AuthUser,
    uri: Uri,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Paginated<Airport>>> {
    let page = state
        .services
        .network
        .list_airports(params.resolve(state.pagination)?)
        .await?;
    Ok(Json(Paginated::new(page, &uri)))
}

async fn create_airport(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(body): ApiJson<AirportBody>,
) -> ApiResult<(StatusCode, Json<Airport>)> {
    user.require_staff()?;
    let created = state.services.network.create_airport(&body.into_input(None)?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_airport(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<AirportDetail>> {
    let connections = state.services.network.get_airport_connections(id).await?;
    Ok(Json(connections.into()))
}

async fn save_airport(
    state: &AppState,
    id: i64,
    body: AirportBody,
    partial: bool,
) -> ApiResult<Json<Airport>> {
    let network = &state.services.network;
    let current = network.get_airport(id).await?;
    let input = body.into_input(partial.then(|| AirportInput::from(&current)))?;
    Ok(Json(network.update_airport(id, &input).await?))
}

async fn put_airport(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<AirportBody>,
) -> ApiResult<Json<Airport>> {
    user.require_staff()?;
    save_airport(&state, id, body, false).await
}

async fn patch_airport(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<AirportBody>,
) -> ApiResult<Json<Airport>> {
    user.require_staff()?;
    save_airport(&state, id, body, true).await
}

async fn delete_airport(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    user.require_staff()?;
    state.services.network.delete_airport(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_routes(
    State(state): State<AppState>,
    _user: AuthUser,
    uri: Uri,
    ApiQuery(params): ApiQuery<PageParams>,
    ApiQuery(filter): ApiQuery<RouteFilter>,
) -> ApiResult<Json<Paginated<RouteListItem>>> {
    let page = state
        .services
        .network
        .list_routes(&filter.normalized(), params.resolve(state.pagination)?)
        .await?;
    Ok(Json(Paginated::new(page.map(RouteListItem::from), &uri)))
}

async fn create_route(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(body): ApiJson<RouteBody>,
) -> ApiResult<(StatusCode, Json<Route>)> {
    user.require_staff()?;
    let created = state.services.network.create_route(&body.into_input(None)?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_route(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Route>> {
    Ok(Json(state.services.network.get_route(id).await?))
}

async fn save_route(state: &AppState, id: i64, body: RouteBody, partial: bool) -> ApiResult<Json<Route>> {
    let network = &state.services.network;
    let current = network.get_route(id).await?;
    let input = body.into_input(partial.then(|| RouteInput::from(&current)))?;
    Ok(Json(network.update_route(id, &input).await?))
}

async fn put_route(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<RouteBody>,
) -> ApiResult<Json<Route>> {
    user.require_staff()?;
    save_route(&state, id, body, false).await
}

async fn patch_route(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<RouteBody>,
) -> ApiResult<Json<Route>> {
    user.require_staff()?;
    save_route(&state, id, body, true).await
}

async fn delete_route(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    user.require_staff()?;
    state.services.network.delete_route(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
