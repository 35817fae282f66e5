// src/handlers/crm.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::lead::{
        AddLeadPayload, AddNotePayload, AddReminderPayload, ChatMessage, Lead, LeadFilter, Note,
        Reminder, SendMessagePayload, StatusChangePayload,
    },
};

// =============================================================================
//  ÁREA 1: LISTA E CADASTRO
// =============================================================================

// GET /api/leads?campaign=<id|all>&status=<status|all>
pub async fn list_leads(
    State(app_state): State<AppState>,
    Query(filter): Query<LeadFilter>,
) -> Json<Vec<Lead>> {
    Json(app_state.crm_service.list(&filter))
}

// POST /api/leads
pub async fn add_lead(
    State(app_state): State<AppState>,
    Json(payload): Json<AddLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lead = app_state.crm_service.add_manual_lead(payload)?;
    Ok((StatusCode::CREATED, Json(lead)))
}

// GET /api/leads/{id}
pub async fn get_lead(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Lead>, AppError> {
    Ok(Json(app_state.crm_service.get(&id)?))
}

// =============================================================================
//  ÁREA 2: DETALHE
// =============================================================================

// PUT /api/leads/{id}/status
pub async fn change_status(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusChangePayload>,
) -> Result<Json<Lead>, AppError> {
    Ok(Json(app_state.crm_service.change_status(&id, payload.status)?))
}

// POST /api/leads/{id}/notes
pub async fn add_note(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AddNotePayload>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    payload.validate()?;

    let note = app_state.crm_service.add_note(&id, payload)?;
    Ok((StatusCode::CREATED, Json(note)))
}

// POST /api/leads/{id}/reminders
pub async fn add_reminder(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AddReminderPayload>,
) -> Result<(StatusCode, Json<Lead>), AppError> {
    payload.validate()?;

    let lead = app_state.crm_service.add_reminder(&id, payload)?;
    Ok((StatusCode::CREATED, Json(lead)))
}

// POST /api/leads/{id}/reminders/{rid}/toggle
pub async fn toggle_reminder(
    State(app_state): State<AppState>,
    Path((id, reminder_id)): Path<(String, String)>,
) -> Result<Json<Reminder>, AppError> {
    Ok(Json(app_state.crm_service.toggle_reminder(&id, &reminder_id)?))
}

// =============================================================================
//  ÁREA 3: CHAT
// =============================================================================

// POST /api/leads/{id}/messages
// A resposta do lead chega depois, em segundo plano.
pub async fn send_message(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SendMessagePayload>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    payload.validate()?;

    let (message, _reply) = app_state.crm_service.send_message(&id, payload.message)?;
    Ok((StatusCode::ACCEPTED, Json(message)))
}

// POST /api/leads/{id}/messages/brochure
pub async fn send_brochure(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    let message = app_state.crm_service.send_brochure(&id)?;
    Ok((StatusCode::CREATED, Json(message)))
}

// POST /api/leads/{id}/messages/welcome
pub async fn send_welcome(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    let message = app_state.crm_service.send_welcome(&id)?;
    Ok((StatusCode::CREATED, Json(message)))
}
