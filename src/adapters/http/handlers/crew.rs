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
use crate::domain::models::{Crew, CrewInput};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/airport/crew/", get(list_crew).post(create_crew))
        .route(
            "/api/airport/crew/{id}/",
            get(get_crew).put(put_crew).patch(patch_crew).delete(delete_crew),
        )
}

#[derive(Debug, Default, Deserialize)]
pub struct CrewBody {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl CrewBody {
    fn into_input(self, current: Option<CrewInput>) -> DomainResult<CrewInput> {
        let (first, last) = match current {
            Some(c) => (Some(c.first_name), Some(c.last_name)),
            None => (None, None),
        };
        Ok(CrewInput {
            first_name: required(self.first_name, first, "first_name")?,
            last_name: required(self.last_name, last, "last_name")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl From<Crew> for CrewResponse {
    fn from(c: Crew) -> Self {
        Self {
            full_name: c.full_name(),
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
        }
    }
}

async fn list_crew(
    State(state): State<AppState>,
    _user: AuthUser,
    uri: Uri,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Json<Paginated<CrewResponse>>> {
    let page = state.services.crew.list(params.resolve(state.pagination)?).await?;
    Ok(Json(Paginated::new(page.map(CrewResponse::from), &uri)))
}

async fn create_crew(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(body): ApiJson<CrewBody>,
) -> ApiResult<(StatusCode, Json<CrewResponse>)> {
    user.require_staff()?;
    let created = state.services.crew.create(&body.into_input(None)?).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

async fn get_crew(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<CrewResponse>> {
    Ok(Json(state.services.crew.get(id).await?.into()))
}

async fn save_crew(state: &AppState, id: i64, body: CrewBody, partial: bool) -> ApiResult<Json<CrewResponse>> {
    let crew = &state.services.crew;
    let current = crew.get(id).await?;
    let input = body.into_input(partial.then(|| CrewInput::from(&current)))?;
    Ok(Json(crew.update(id, &input).await?.into()))
}

async fn put_crew(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<CrewBody>,
) -> ApiResult<Json<CrewResponse>> {
    user.require_staff()?;
    save_crew(&state, id, body, false).await
}

async fn patch_crew(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<CrewBody>,
) -> ApiResult<Json<CrewResponse>> {
    user.require_staff()?;
    save_crew(&state, id, body, true).await
}

async fn delete_crew(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    user.require_staff()?;
    state.services.crew.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
