// src/llm/scripted.rs
//
// Gerador falso: devolve respostas enfileiradas e registra os prompts.
// Usado nos testes e em demos offline.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::llm::{GenerationError, GenerationService, ImageRequest, InlineImage, TextRequest};

#[derive(Default)]
pub struct ScriptedGenerator {
    texts: Mutex<VecDeque<Result<String, String>>>,
    images: Mutex<VecDeque<Result<InlineImage, String>>>,
    text_requests: Mutex<Vec<TextRequest>>,
    image_requests: Mutex<Vec<ImageRequest>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&self, text: impl Into<String>) -> &Self {
        self.texts.lock().unwrap_or_else(|e| e.into_inner()).push_back(Ok(text.into()));
        self
    }

    pub fn push_text_failure(&self, reason: impl Into<String>) -> &Self {
        self.texts.lock().unwrap_or_else(|e| e.into_inner()).push_back(Err(reason.into()));
        self
    }

    pub fn push_image(&self, image: InlineImage) -> &Self {
        self.images.lock().unwrap_or_else(|e| e.into_inner()).push_back(Ok(image));
        self
    }

    pub fn push_image_failure(&self, reason: impl Into<String>) -> &Self {
        self.images.lock().unwrap_or_else(|e| e.into_inner()).push_back(Err(reason.into()));
        self
    }

    pub fn text_requests(&self) -> Vec<TextRequest> {
        self.text_requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn image_requests(&self) -> Vec<ImageRequest> {
        self.image_requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.text_requests().len() + self.image_requests().len()
    }
}

#[async_trait]
impl GenerationService for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate_text(&self, request: TextRequest) -> Result<String, GenerationError> {
        self.text_requests.lock().unwrap_or_else(|e| e.into_inner()).push(request);
        match self.texts.lock().unwrap_or_else(|e| e.into_inner()).pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(reason)) => Err(GenerationError::Api(reason)),
            None => Err(GenerationError::EmptyResponse),
        }
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<InlineImage, GenerationError> {
        self.image_requests.lock().unwrap_or_else(|e| e.into_inner()).push(request);
        match self.images.lock().unwrap_or_else(|e| e.into_inner()).pop_front() {
            Some(Ok(image)) => Ok(image),
            Some(Err(reason)) => Err(GenerationError::Api(reason)),
            None => Err(GenerationError::EmptyResponse),
        }
    }
}
