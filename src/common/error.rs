// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm::GenerationError;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Nenhuma variante é fatal: tudo vira uma mensagem para o usuário.
#[derive(Debug, Error)]
pub enum AppError {
    // Payloads HTTP inválidos (derive do `validator`)
    #[error("Invalid request payload")]
    PayloadValidation(#[from] validator::ValidationErrors),

    // O usuário precisa corrigir a etapa antes de avançar
    #[error("{0}")]
    ValidationError(String),

    // Uma ação de IA precisa de campos anteriores preenchidos
    #[error("{0}")]
    PrerequisiteMissing(String),

    #[error("{0}")]
    GenerationFailed(String),

    #[error("Could not save your data. Please check your browser storage settings. ({0})")]
    PersistenceError(String),

    #[error("Invalid credentials provided.")]
    InvalidCredentials,

    #[error("An account with this email already exists.")]
    AccountExists,

    #[error("Please log in to access the dashboard.")]
    NotAuthenticated,

    #[error("Lead not found")]
    LeadNotFound,

    #[error("Campaign not found")]
    CampaignNotFound,

    #[error("Reminder not found")]
    ReminderNotFound,

    #[error("Campaign wizard not found or already finished")]
    WizardNotFound,

    #[error("Unknown integration: {0}")]
    IntegrationNotFound(String),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::PersistenceError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::PersistenceError(err.to_string())
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::GenerationFailed(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Retorna todos os detalhes da validação.
            AppError::PayloadValidation(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::ValidationError(_) | AppError::PrerequisiteMissing(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::PersistenceError(_) => StatusCode::INSUFFICIENT_STORAGE,
            AppError::InvalidCredentials | AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AppError::AccountExists => StatusCode::CONFLICT,
            AppError::LeadNotFound
            | AppError::CampaignNotFound
            | AppError::ReminderNotFound
            | AppError::WizardNotFound
            | AppError::IntegrationNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
