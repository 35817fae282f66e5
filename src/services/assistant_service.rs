// src/services/assistant_service.rs
//
// Assistentes avulsos: chatbot de vendas da landing page e rascunho de
// post para o LinkedIn.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::{
    common::{error::AppError, validation::validate_not_blank},
    llm::{GenerationService, TextRequest},
};

const SALES_SYSTEM_INSTRUCTION: &str = "You are a friendly and professional sales assistant for AdTargetz Ai.

About AdTargetz Ai:
- An AI-powered customer acquisition platform.
- Services: Omnichannel Ads (Google, Meta, TV, Radio, Theatre), CRM Suite, WhatsApp Marketing, API Integrations.
- Key Features: Predictive budget allocation, automated creative generation, cross-platform retargeting.

Pricing Plans:
1. Starter: Free platform access, you pay for Ad Packs (e.g., ₹2,100 for 3 days). 20% service fee included in packs. Ideal for small businesses.
2. Growth: ₹14,000/month. Connect own ad accounts, unlimited spend, dedicated support. Ideal for brands.
3. CRM Suite: ₹20,000/year. Pipeline management, lead distribution.
4. WhatsApp Marketing: ₹25,000 setup fee (waived for All-in-One), plus usage charges.

Your Goal:
Answer questions concisely and encourage the user to Sign Up or Contact Sales. Be helpful and persuasive but honest.";

pub const CHATBOT_FALLBACK: &str =
    "I'm having trouble connecting to my brain right now. Please try again later or contact support directly.";

#[derive(Debug, Deserialize, Validate)]
pub struct ChatbotPayload {
    #[validate(custom(function = "validate_not_blank", message = "Message cannot be empty."))]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LinkedInPostPayload {
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AssistantReply {
    pub text: String,
}

#[derive(Clone)]
pub struct AssistantService {
    generator: Arc<dyn GenerationService>,
}

impl AssistantService {
    pub fn new(generator: Arc<dyn GenerationService>) -> Self {
        Self { generator }
    }

    /// Single-turn answer. Failures turn into the fixed apology, never an error.
    pub async fn chatbot(&self, message: &str) -> AssistantReply {
        let request = TextRequest::new(message.trim()).with_system_instruction(SALES_SYSTEM_INSTRUCTION);
        let text = match self.generator.generate_text(request).await {
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Chatbot call failed");
                CHATBOT_FALLBACK.to_string()
            }
        };
        AssistantReply { text }
    }

    pub async fn linkedin_post(&self, topic: &str) -> Result<AssistantReply, AppError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::PrerequisiteMissing(
                "Please enter a topic for the post.".to_string(),
            ));
        }

        let prompt = format!(
            "Write a professional, engaging LinkedIn post about \"{}\".\n\
             Include 3 relevant hashtags.\n\
             Tone: Thought Leadership, Professional but accessible.\n\
             Structure: Hook, Value Proposition, Call to Action.",
            topic
        );

        let text = self
            .generator
            .generate_text(TextRequest::new(prompt))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "LinkedIn post generation failed");
                AppError::GenerationFailed("Failed to generate content. Please try again.".to_string())
            })?;

        Ok(AssistantReply { text: text.trim().to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ScriptedGenerator;

    #[tokio::test]
    async fn chatbot_uses_sales_instruction_and_falls_back() {
        let generator = Arc::new(ScriptedGenerator::new());
        generator.push_text("  The Growth plan is ₹14,000/month. ").push_text_failure("offline");
        let service = AssistantService::new(generator.clone());

        let reply = service.chatbot("How much is Growth?").await;
        assert_eq!(reply.text, "The Growth plan is ₹14,000/month.");
        let sent = &generator.text_requests()[0];
        assert!(sent.system_instruction.as_deref().unwrap().contains("AdTargetz Ai"));

        assert_eq!(service.chatbot("hello?").await.text, CHATBOT_FALLBACK);
    }

    #[tokio::test]
    async fn linkedin_post_needs_a_topic() {
        let generator = Arc::new(ScriptedGenerator::new());
        let service = AssistantService::new(generator.clone());

        let err = service.linkedin_post("   ").await.unwrap_err();
        assert!(matches!(err, AppError::PrerequisiteMissing(_)));
        assert_eq!(generator.call_count(), 0);

        generator.push_text("Hook...\n#ai #ads #growth");
        let post = service.linkedin_post("AI in advertising").await.unwrap();
        assert!(post.text.ends_with("#growth"));
        assert!(generator.text_requests()[0].prompt.contains("\"AI in advertising\""));
    }

    #[test]
    fn blank_chatbot_message_is_invalid() {
        assert!(ChatbotPayload { message: " \n ".into() }.validate().is_err());
        assert!(ChatbotPayload { message: "Pricing?".into() }.validate().is_ok());
    }
}
