//! Signup, login, profile and password-reset handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::auth::AuthUser;
use super::response::{blocking, ApiError};
use super::state::AppState;
use crate::application::account::RESET_REQUESTED_MESSAGE;
use crate::application::Session;
use crate::domain::User;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            user: session.user,
        }
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let request = body(payload)?;
    let accounts = Arc::clone(&state.accounts);
    let session = blocking(move || {
        accounts.signup(&request.email, &request.password, &request.name)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let request = body(payload)?;
    let accounts = Arc::clone(&state.accounts);
    let session = blocking(move || accounts.login(&request.email, &request.password)).await?;
    Ok(Json(session.into()))
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<User>, ApiError> {
    let accounts = Arc::clone(&state.accounts);
    let profile = blocking(move || accounts.profile(user.id)).await?;
    Ok(Json(profile))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = body(payload)?;
    let accounts = Arc::clone(&state.accounts);
    blocking(move || accounts.forgot_password(&request.email)).await?;
    Ok(Json(json!({ "message": RESET_REQUESTED_MESSAGE })))
}

pub async fn reset_password(
    State(state): State<AppState>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = body(payload)?;
    let accounts = Arc::clone(&state.accounts);
    blocking(move || accounts.reset_password(&request.token, &request.password)).await?;
    Ok(Json(json!({ "message": "Password reset successfully" })))
}
