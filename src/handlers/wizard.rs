// src/handlers/wizard.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::wizard::{DraftPatch, ImageUploadPayload, VideoUploadPayload, WizardCatalog, WizardView},
    services::{
        assist::AssistAction,
        wizard_service::{AdvanceResponse, AssistResponse},
    },
};

// GET /api/wizards/catalog
pub async fn get_catalog(State(app_state): State<AppState>) -> Json<WizardCatalog> {
    Json(app_state.wizard_service.catalog())
}

// POST /api/wizards
pub async fn open_wizard(State(app_state): State<AppState>) -> impl IntoResponse {
    let view = app_state.wizard_service.open().await;
    (StatusCode::CREATED, Json(view))
}

// GET /api/wizards/{id}
pub async fn get_wizard(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    Ok(Json(app_state.wizard_service.view(id).await?))
}

// DELETE /api/wizards/{id}
pub async fn discard_wizard(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.wizard_service.discard(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// PATCH /api/wizards/{id}/draft
pub async fn update_draft(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<DraftPatch>,
) -> Result<Json<WizardView>, AppError> {
    Ok(Json(app_state.wizard_service.update(id, patch).await?))
}

// POST /api/wizards/{id}/advance
pub async fn advance(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let response = app_state.wizard_service.advance(id).await?;
    let status = match response {
        AdvanceResponse::Committed { .. } => StatusCode::CREATED,
        AdvanceResponse::Moved { .. } => StatusCode::OK,
    };
    Ok((status, Json(response)))
}

// POST /api/wizards/{id}/retreat
pub async fn retreat(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    Ok(Json(app_state.wizard_service.retreat(id).await?))
}

// POST /api/wizards/{id}/assist/{action}
pub async fn assist(
    State(app_state): State<AppState>,
    Path((id, action)): Path<(Uuid, AssistAction)>,
) -> Result<Json<AssistResponse>, AppError> {
    Ok(Json(app_state.wizard_service.assist(id, action).await?))
}

// POST /api/wizards/{id}/uploads/image
pub async fn upload_image(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ImageUploadPayload>,
) -> Result<Json<WizardView>, AppError> {
    Ok(Json(app_state.wizard_service.upload_image(id, payload).await?))
}

// POST /api/wizards/{id}/uploads/video
pub async fn upload_video(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VideoUploadPayload>,
) -> Result<Json<WizardView>, AppError> {
    Ok(Json(app_state.wizard_service.upload_video(id, payload).await?))
}
