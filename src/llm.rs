// src/llm.rs
//
// Fronteira com o serviço de geração de conteúdo (texto e imagem).
// Uma chamada por ação: sem retry, sem streaming, sem cache.

pub mod gemini;
pub mod scripted;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use gemini::GeminiClient;
pub use scripted::ScriptedGenerator;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generation API key is not configured")]
    MissingApiKey,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Generation service error: {0}")]
    Api(String),
    #[error("The generation service returned no usable content")]
    EmptyResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
}

impl TextRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

/// Inline image bytes, kept base64-encoded exactly as they travel on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl InlineImage {
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Splits `data:<mime>;base64,<payload>`. The payload is not decoded here.
    pub fn from_data_uri(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix("data:")?;
        let (header, data) = rest.split_once(',')?;
        let mime_type = header.strip_suffix(";base64")?;
        if mime_type.is_empty() || data.is_empty() {
            return None;
        }
        Some(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ContentPart {
    Text(String),
    Image(InlineImage),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRequest {
    pub parts: Vec<ContentPart>,
}

#[async_trait]
pub trait GenerationService: Send + Sync {
    fn name(&self) -> &str;

    async fn generate_text(&self, request: TextRequest) -> Result<String, GenerationError>;

    async fn generate_image(&self, request: ImageRequest) -> Result<InlineImage, GenerationError>;
}
