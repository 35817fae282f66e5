// src/handlers/assistant.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    services::assistant_service::{AssistantReply, ChatbotPayload, LinkedInPostPayload},
};

// POST /api/chatbot (público, widget da landing page)
pub async fn chatbot(
    State(app_state): State<AppState>,
    Json(payload): Json<ChatbotPayload>,
) -> Result<Json<AssistantReply>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.assistant_service.chatbot(&payload.message).await))
}

// POST /api/linkedin/post
pub async fn linkedin_post(
    State(app_state): State<AppState>,
    Json(payload): Json<LinkedInPostPayload>,
) -> Result<Json<AssistantReply>, AppError> {
    Ok(Json(app_state.assistant_service.linkedin_post(&payload.topic).await?))
}
