// src/llm/gemini.rs

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::llm::{ContentPart, GenerationError, GenerationService, ImageRequest, InlineImage, TextRequest};

pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: Option<String>,
        base_url: String,
        text_model: String,
        image_model: String,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            text_model,
            image_model,
        }
    }

    async fn generate_content(&self, model: &str, body: Value) -> Result<Value, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;

        let response = self
            .client
            .post(format!("{}/v1beta/models/{}:generateContent", self.base_url, model))
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api(format!("Gemini error {}: {}", status, text)));
        }

        response
            .json()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))
    }
}

fn candidate_parts(json: &Value) -> &[Value] {
    json["candidates"][0]["content"]["parts"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[async_trait]
impl GenerationService for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_text(&self, request: TextRequest) -> Result<String, GenerationError> {
        let mut body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
        });
        if let Some(system) = &request.system_instruction {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }

        let json = self.generate_content(&self.text_model, body).await?;

        let text: String = candidate_parts(&json)
            .iter()
            .filter_map(|part| part["text"].as_str())
            .collect();

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<InlineImage, GenerationError> {
        let parts: Vec<Value> = request
            .parts
            .iter()
            .map(|part| match part {
                ContentPart::Text(text) => json!({ "text": text }),
                ContentPart::Image(image) => json!({
                    "inlineData": { "mimeType": image.mime_type, "data": image.data }
                }),
            })
            .collect();

        let body = json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": { "responseModalities": ["IMAGE"] },
        });

        let json = self.generate_content(&self.image_model, body).await?;

        // A primeira parte com inlineData é a imagem
        candidate_parts(&json)
            .iter()
            .find_map(|part| {
                let inline = part.get("inlineData")?;
                let data = inline["data"].as_str()?;
                let mime_type = inline["mimeType"].as_str().unwrap_or("image/png");
                Some(InlineImage {
                    mime_type: mime_type.to_string(),
                    data: data.to_string(),
                })
            })
            .ok_or(GenerationError::EmptyResponse)
    }
}
