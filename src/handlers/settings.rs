// src/handlers/settings.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::settings::{IntegrationStatus, NotificationPreferences, PasswordChangePayload, UserProfile},
};

// GET /api/settings/profile
pub async fn get_profile(State(app_state): State<AppState>) -> Json<UserProfile> {
    Json(app_state.settings_service.get_profile())
}

// PUT /api/settings/profile
pub async fn update_profile(
    State(app_state): State<AppState>,
    Json(payload): Json<UserProfile>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(app_state.settings_service.update_profile(payload)?))
}

// GET /api/settings/notifications
pub async fn get_notifications(State(app_state): State<AppState>) -> Json<NotificationPreferences> {
    Json(app_state.settings_service.get_notifications())
}

// PUT /api/settings/notifications
pub async fn update_notifications(
    State(app_state): State<AppState>,
    Json(payload): Json<NotificationPreferences>,
) -> Result<Json<NotificationPreferences>, AppError> {
    Ok(Json(app_state.settings_service.update_notifications(payload)?))
}

// POST /api/settings/password
pub async fn change_password(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<PasswordChangePayload>,
) -> Result<StatusCode, AppError> {
    app_state.settings_service.change_password(&payload)?;
    tracing::info!(email = %user.email, "Password updated");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  INTEGRAÇÕES
// =============================================================================

// GET /api/integrations
pub async fn list_integrations(State(app_state): State<AppState>) -> Json<Vec<IntegrationStatus>> {
    Json(app_state.settings_service.list_integrations())
}

// POST /api/integrations/{id}/toggle
pub async fn toggle_integration(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IntegrationStatus>, AppError> {
    Ok(Json(app_state.settings_service.toggle_integration(&id)?))
}
