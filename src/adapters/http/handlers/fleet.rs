//! `/api/airport/airplane_types/` and `/api/airport/airplanes/`.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::{media_url, required, OrderingParams};
use crate::adapters::http::auth::AuthUser;
use crate::adapters::http::error::{ApiError, ApiResult};
use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::pagination::{PageParams, Paginated};
use crate::adapters::http::AppState;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Airplane, AirplaneInput, AirplaneType, AirplaneTypeInput, Ordering};

/// Multipart overhead allowed on top of the image size limit.
const MULTIPART_SLACK: usize = 64 * 1024;

pub fn routes(max_image_bytes: u64) -> Router<AppState> {
    let upload_limit = usize::try_from(max_image_bytes)
        .unwrap_or(usize::MAX)
        .saturating_mul(2)
        .saturating_add(MULTIPART_SLACK);

    Router::new()
        .route("/api/airport/airplane_types/", get(list_types).post(create_type))
        .route(
            "/api/airport/airplane_types/{id}/",
            get(get_type).put(put_type).patch(patch_type).delete(delete_type),
        )
        .route("/api/airport/airplanes/", get(list_airplanes).post(create_airplane))
        .route(
            "/api/airport/airplanes/{id}/",
            get(get_airplane)
                .put(put_airplane)
                .patch(patch_airplane)
                .delete(delete_airplane),
        )
        .route(
            "/api/airport/airplanes/{id}/upload-image/",
            post(upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
}

#[derive(Debug, Default, Deserialize)]
pub struct AirplaneTypeBody {
    #[serde(default)]
    pub name: Option<String>,
}

impl AirplaneTypeBody {
    fn into_input(self, current: Option<&AirplaneType>) -> DomainResult<AirplaneTypeInput> {
        Ok(AirplaneTypeInput {
            name: required(self.name, current.map(|t| t.name.clone()), "name")?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AirplaneBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rows: Option<u32>,
    #[serde(default)]
    pub seats_in_row: Option<u32>,
    #[serde(default)]
    pub airplane_type: Option<i64>,
}

impl AirplaneBody {
    fn into_input(self, current: Option<AirplaneInput>) -> DomainResult<AirplaneInput> {
        let (name, rows, seats_in_row, airplane_type) = match current {
            Some(c) => (Some(c.name), Some(c.rows), Some(c.seats_in_row), Some(c.airplane_type_id)),
            None => (None, None, None, None),
        };
        Ok(AirplaneInput {
            name: required(self.name, name, "name")?,
            rows: required(self.rows, rows, "rows")?,
            seats_in_row: required(self.seats_in_row, seats_in_row, "seats_in_row")?,
            airplane_type_id: required(self.airplane_type, airplane_type, "airplane_type")?,
        })
    }
}

/// Airplane in listings: the type is shown by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirplaneListItem {
    pub id: i64,
    pub name: String,
    pub rows: u32,
    pub seats_in_row: u32,
    pub capacity: u64,
    pub airplane_type: String,
    pub image: Option<String>,
    pub used_in_flights: u64,
}

impl From<Airplane> for AirplaneListItem {
    fn from(a: Airplane) -> Self {
        Self {
            id: a.id,
            capacity: a.capacity(),
            image: a.image.as_deref().map(media_url),
            name: a.name,
            rows: a.rows,
            seats_in_row: a.seats_in_row,
            airplane_type: a.airplane_type.name,
            used_in_flights: a.used_in_flights,
        }
    }
}

/// Airplane detail: the type is nested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirplaneDetail {
    pub id: i64,
    pub name: String,
    pub rows: u32,
    pub seats_in_row: u32,
    pub capacity: u64,
    pub airplane_type: AirplaneType,
    pub image: Option<String>,
    pub used_in_flights: u64,
}

impl From<Airplane> for AirplaneDetail {
    fn from(a: Airplane) -> Self {
        Self {
            id: a.id,
            capacity: a.capacity(),
            image: a.image.as_deref().map(media_url),
            name: a.name,
            rows: a.rows,
            seats_in_row: a.seats_in_row,
            airplane_type: a.airplane_type,
            used_in_flights: a.used_in_flights,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageResponse {
    pub id: i64,
    pub image: Option<String>,
}

async fn list_types(
    State(state): State<AppState>,
    _user: AuthUser,
    uri: Uri,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Paginated<AirplaneType>>> {
    let page = state.services.fleet.list_types(params.resolve(state.pagination)?).await?;
    Ok(Json(Paginated::new(page, &uri)))
}

async fn create_type(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(body): ApiJson<AirplaneTypeBody>,
) -> ApiResult<(StatusCode, Json<AirplaneType>)> {
    user.require_staff()?;
    let created = state.services.fleet.create_type(&body.into_input(None)?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_type(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<AirplaneType>> {
    Ok(Json(state.services.fleet.get_type(id).await?))
}

async fn save_type(
    state: &AppState,
    id: i64,
    body: AirplaneTypeBody,
    partial: bool,
) -> ApiResult<Json<AirplaneType>> {
    let fleet = &state.services.fleet;
    let current = fleet.get_type(id).await?;
    let input = body.into_input(partial.then_some(&current))?;
    Ok(Json(fleet.update_type(id, &input).await?))
}

async fn put_type(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<AirplaneTypeBody>,
) -> ApiResult<Json<AirplaneType>> {
    user.require_staff()?;
    save_type(&state, id, body, false).await
}

async fn patch_type(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<AirplaneTypeBody>,
) -> ApiResult<Json<AirplaneType>> {
    user.require_staff()?;
    save_type(&state, id, body, true).await
}

async fn delete_type(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    user.require_staff()?;
    state.services.fleet.delete_type(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_airplanes(
    State(state): State<AppState>,
    _user: AuthUser,
    uri: Uri,
    ApiQuery(params): ApiQuery<PageParams>,
    ApiQuery(ordering): ApiQuery<OrderingParams>,
) -> ApiResult<Json<Paginated<AirplaneListItem>>> {
    let ordering = Ordering::from_query(ordering.ordering.as_deref());
    let page = state
        .services
        .fleet
        .list_airplanes(ordering.as_ref(), params.resolve(state.pagination)?)
        .await?;
    Ok(Json(Paginated::new(page.map(AirplaneListItem::from), &uri)))
}

async fn create_airplane(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(body): ApiJson<AirplaneBody>,
) -> ApiResult<(StatusCode, Json<AirplaneDetail>)> {
    user.require_staff()?;
    let created = state.services.fleet.create_airplane(&body.into_input(None)?).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

async fn get_airplane(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<AirplaneDetail>> {
    Ok(Json(state.services.fleet.get_airplane(id).await?.into()))
}

async fn save_airplane(
    state: &AppState,
    id: i64,
    body: AirplaneBody,
    partial: bool,
) -> ApiResult<Json<AirplaneDetail>> {
    let fleet = &state.services.fleet;
    let current = fleet.get_airplane(id).await?;
    let input = body.into_input(partial.then(|| AirplaneInput::from(&current)))?;
    Ok(Json(fleet.update_airplane(id, &input).await?.into()))
}

async fn put_airplane(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<AirplaneBody>,
) -> ApiResult<Json<AirplaneDetail>> {
    user.require_staff()?;
    save_airplane(&state, id, body, false).await
}

async fn patch_airplane(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<AirplaneBody>,
) -> ApiResult<Json<AirplaneDetail>> {
    user.require_staff()?;
    save_airplane(&state, id, body, true).await
}

async fn delete_airplane(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    user.require_staff()?;
    state.services.fleet.delete_airplane(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Read the `image` part of a multipart body.
async fn read_image(mut multipart: Multipart) -> ApiResult<(String, Vec<u8>)> {
    let multipart_error = |e: axum::extract::multipart::MultipartError| {
        ApiError::new(e.status(), "INVALID_MULTIPART", e.body_text())
    };

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("image") {
            continue;
        }
        let filename = field.file_name().unwrap_or("image").to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        if bytes.is_empty() {
            return Err(DomainError::invalid_field("image", "The submitted file is empty.").into());
        }
        return Ok((filename, bytes.to_vec()));
    }
    Err(DomainError::invalid_field("image", "No file was submitted.").into())
}

async fn upload_image(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<ImageResponse>> {
    user.require_staff()?;
    let (filename, bytes) = read_image(multipart?).await?;
    let airplane = state.services.fleet.upload_image(id, &filename, &bytes).await?;
    Ok(Json(ImageResponse {
        id: airplane.id,
        image: airplane.image.as_deref().map(media_url),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_write_requires_every_field() {
        let body: AirplaneBody = serde_json::from_str(r#"{"name": "A", "rows": 3}"#).unwrap();
        match body.into_input(None) {
            Err(DomainError::InvalidField { field, .. }) => assert_eq!(field, "seats_in_row"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_partial_write_keeps_current_values() {
        let body: AirplaneBody = serde_json::from_str(r#"{"rows": 30}"#).unwrap();
        let current = AirplaneInput {
            name: "A".to_string(),
            rows: 3,
            seats_in_row: 4,
            airplane_type_id: 9,
        };
        let input = body.into_input(Some(current)).unwrap();
        assert_eq!(input.rows, 30);
        assert_eq!(input.seats_in_row, 4);
        assert_eq!(input.airplane_type_id, 9);
    }
}
