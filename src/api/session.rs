use axum::{
    Json,
    extract::{FromRequestParts, State, rejection::JsonRejection},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::YatraError;
use crate::session::User;

/// Signed-in caller, resolved from `Authorization: Bearer <token>`
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| YatraError::unauthorized("Missing bearer token"))?;
        let user = state.sessions.current(&token).await.require_user()?;
        Ok(CurrentUser { user, token })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: User,
}

pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Json<SignInResponse>, ApiError> {
    let Json(request) = payload?;
    let (token, user) = state
        .sessions
        .sign_in(&request.email, request.display_name.as_deref())
        .await?;
    Ok(Json(SignInResponse { token, user }))
}

pub async fn whoami(current: CurrentUser) -> Json<User> {
    Json(current.user)
}

pub async fn sign_out(State(state): State<AppState>, current: CurrentUser) -> StatusCode {
    state.sessions.sign_out(&current.token).await;
    StatusCode::NO_CONTENT
}
