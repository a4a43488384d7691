//! `/api/user/`: registration, token login and the caller's own account.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::required;
use crate::adapters::http::auth::AuthUser;
use crate::adapters::http::error::ApiResult;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::AppState;
use crate::domain::errors::DomainResult;
use crate::domain::models::{NewUser, User, UserUpdate};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/user/register/", post(register))
        .route("/api/user/login/", post(login))
        .route("/api/user/me/", get(me).put(put_me).patch(patch_me).delete(delete_me))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            is_staff: u.is_staff,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserBody {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserBody {
    fn into_new_user(self) -> DomainResult<NewUser> {
        Ok(NewUser {
            email: required(self.email, None, "email")?,
            password: required(self.password, None, "password")?,
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            is_staff: false,
        })
    }

    /// A full update needs the login fields; a partial one takes what is given.
    fn into_update(self, partial: bool) -> DomainResult<UserUpdate> {
        if !partial {
            required(self.email.as_ref(), None, "email")?;
            required(self.password.as_ref(), None, "password")?;
        }
        Ok(UserUpdate {
            email: self.email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
        })
    }
}

async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<UserBody>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.services.users.register(&body.into_new_user()?).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Credentials>,
) -> ApiResult<Json<TokenResponse>> {
    let email = required(body.email, None, "email")?;
    let password = required(body.password, None, "password")?;
    let token = state.services.users.login(&email, &password).await?;
    Ok(Json(TokenResponse { token }))
}

async fn me(user: AuthUser) -> Json<UserResponse> {
    Json(user.0.into())
}

async fn put_me(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(body): ApiJson<UserBody>,
) -> ApiResult<Json<UserResponse>> {
    let updated = state.services.users.update_me(user.id(), &body.into_update(false)?).await?;
    Ok(Json(updated.into()))
}

async fn patch_me(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(body): ApiJson<UserBody>,
) -> ApiResult<Json<UserResponse>> {
    let updated = state.services.users.update_me(user.id(), &body.into_update(true)?).await?;
    Ok(Json(updated.into()))
}

async fn delete_me(State(state): State<AppState>, user: AuthUser) -> ApiResult<StatusCode> {
    state.services.users.delete_me(user.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
