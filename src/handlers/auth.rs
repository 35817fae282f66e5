// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{CredentialsPayload, SessionState, User},
};

// GET /api/auth/session
pub async fn get_session(State(app_state): State<AppState>) -> Json<SessionState> {
    Json(app_state.auth_service.state())
}

// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;

    let user = app_state.auth_service.login(&payload.email, &payload.password)?;
    Ok(Json(user))
}

// POST /api/auth/signup
pub async fn signup(
    State(app_state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state.auth_service.signup(&payload.email, &payload.password)?;
    Ok((StatusCode::CREATED, Json(user)))
}

// POST /api/auth/logout
pub async fn logout(State(app_state): State<AppState>) -> Result<StatusCode, AppError> {
    app_state.auth_service.logout()?;
    Ok(StatusCode::NO_CONTENT)
}
