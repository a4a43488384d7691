//! Token authentication and the staff-or-read-only permission.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::domain::models::User;

const SCHEME: &str = "token";

/// The user behind a valid `Authorization: Token <key>` header.
///
/// Missing or unknown tokens reject with 401. Any authenticated user may
/// read; handlers that write call [`AuthUser::require_staff`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    /// Only staff may change resources.
    pub fn require_staff(&self) -> ApiResult<()> {
        if self.0.is_staff {
            Ok(())
        } else {
            Err(ApiError::forbidden())
        }
    }

    pub fn id(&self) -> i64 {
        self.0.id
    }
}

fn token_from_header(value: &str) -> ApiResult<&str> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(key), None) if scheme.eq_ignore_ascii_case(SCHEME) => Ok(key),
        (Some(scheme), None, _) if scheme.eq_ignore_ascii_case(SCHEME) => Err(
            ApiError::unauthorized("Invalid token header. No credentials provided."),
        ),
        (Some(scheme), Some(_), Some(_)) if scheme.eq_ignore_ascii_case(SCHEME) => Err(
            ApiError::unauthorized("Invalid token header. Token string should not contain spaces."),
        ),
        _ => Err(ApiError::unauthorized(
            "Authentication credentials were not provided.",
        )),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Authentication credentials were not provided."))?;
        let key = token_from_header(header)?;

        let user = state
            .services
            .users
            .authenticate(key)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid token."))?;
        Ok(Self(user))
    }
}
