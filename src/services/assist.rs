// src/services/assist.rs
//
// Ações de IA do wizard: pré-requisitos, prompt, chamada e aplicação do
// resultado no campo alvo.

use serde::{Deserialize, Serialize};

use crate::{
    common::error::AppError,
    llm::{ContentPart, GenerationService, ImageRequest, InlineImage, TextRequest},
    models::wizard::{CampaignDraft, DraftField},
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum AssistAction {
    Description,
    Goal,
    Kpis,
    Competitors,
    Location,
    Age,
    Interests,
    AdCopy,
    Language,
    Image,
    VideoScript,
    Budget,
}

const AUDIENCE_PREREQUISITES: &[DraftField] = &[DraftField::ProductDescription, DraftField::CampaignGoal];

impl AssistAction {
    /// Draft field overwritten by a successful call.
    pub fn target(&self) -> DraftField {
        match self {
            AssistAction::Description => DraftField::ProductDescription,
            AssistAction::Goal => DraftField::CampaignGoal,
            AssistAction::Kpis => DraftField::Kpis,
            AssistAction::Competitors => DraftField::Competitors,
            AssistAction::Location => DraftField::Location,
            AssistAction::Age => DraftField::Age,
            AssistAction::Interests => DraftField::Interests,
            AssistAction::AdCopy => DraftField::AdCopy,
            AssistAction::Language => DraftField::AdLanguage,
            AssistAction::Image => DraftField::GeneratedImageUrl,
            AssistAction::VideoScript => DraftField::VideoScript,
            AssistAction::Budget => DraftField::Budget,
        }
    }

    pub fn prerequisites(&self) -> &'static [DraftField] {
        match self {
            AssistAction::Description => &[DraftField::BusinessName, DraftField::BusinessClassification],
            AssistAction::Goal => &[
                DraftField::BusinessName,
                DraftField::ProductDescription,
                DraftField::BusinessClassification,
            ],
            AssistAction::Kpis => &[DraftField::CampaignGoal],
            AssistAction::Competitors => &[
                DraftField::BusinessName,
                DraftField::BusinessLocation,
                DraftField::BusinessClassification,
            ],
            AssistAction::Location | AssistAction::Age | AssistAction::Interests => AUDIENCE_PREREQUISITES,
            AssistAction::AdCopy => &[DraftField::ProductDescription, DraftField::Interests],
            AssistAction::Language => &[DraftField::Location],
            AssistAction::Image => &[DraftField::ImagePrompt],
            AssistAction::VideoScript => &[DraftField::AdCopy],
            AssistAction::Budget => &[
                DraftField::ProductDescription,
                DraftField::CampaignGoal,
                DraftField::Interests,
            ],
        }
    }

    fn missing_message(&self) -> &'static str {
        match self {
            AssistAction::Description => "Please fill in Business Name and Category to auto-draft a description.",
            AssistAction::Goal => {
                "Please fill in Business Name, Category, and Product Description first for a better suggestion."
            }
            AssistAction::Kpis => "Please provide a Campaign Goal first to get relevant KPI suggestions.",
            AssistAction::Competitors => {
                "Please fill in Business Name, Location, and Category to get accurate competitor suggestions."
            }
            AssistAction::Location | AssistAction::Age | AssistAction::Interests => {
                "Please complete the Business Details step first. Product Description and Campaign Goal are required for accurate suggestions."
            }
            AssistAction::AdCopy => {
                "Please complete the Business Details and Target Audience steps first for better ad copy."
            }
            AssistAction::Language => "Please provide a location in the Target Audience step to get language suggestions.",
            AssistAction::Image => "Please describe the image you want to generate in the Creative Brief.",
            AssistAction::VideoScript => {
                "Please generate or write your Ad Copy in the \"Ad Creative\" step first."
            }
            AssistAction::Budget => {
                "Please complete the Business Details and Target Audience steps first to get an accurate suggestion."
            }
        }
    }

    fn failure_message(&self) -> String {
        match self {
            AssistAction::Description | AssistAction::Goal | AssistAction::Kpis | AssistAction::Competitors => {
                format!(
                    "AI suggestion for {} failed. Please ensure your business details are clear and try again.",
                    self.slug()
                )
            }
            AssistAction::Location | AssistAction::Age | AssistAction::Interests => format!(
                "AI suggestion for {} failed. This might be a network issue. Please try again or enter the information manually.",
                self.slug()
            ),
            AssistAction::AdCopy => "AI copy generation failed. Try refining your product description or target audience details for better results, or write the copy manually.".to_string(),
            AssistAction::Language => "AI language suggestion failed. Please ensure you have set a location, or enter languages manually.".to_string(),
            AssistAction::Image => "AI image generation failed. This can happen with very complex or abstract prompts. Please try simplifying your creative brief and try again.".to_string(),
            AssistAction::VideoScript => "AI video idea generation failed. A clear and complete ad copy from the previous step is needed for the best results. Please review it and try again.".to_string(),
            AssistAction::Budget => "AI budget suggestion failed. Please ensure all previous steps are filled and try again.".to_string(),
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            AssistAction::Description => "description",
            AssistAction::Goal => "goal",
            AssistAction::Kpis => "kpis",
            AssistAction::Competitors => "competitors",
            AssistAction::Location => "location",
            AssistAction::Age => "age",
            AssistAction::Interests => "interests",
            AssistAction::AdCopy => "adCopy",
            AssistAction::Language => "language",
            AssistAction::Image => "image",
            AssistAction::VideoScript => "videoScript",
            AssistAction::Budget => "budget",
        }
    }

    /// `PrerequisiteMissing` with the action's message when any prerequisite is empty.
    pub fn check_prerequisites(&self, draft: &CampaignDraft) -> Result<(), AppError> {
        match draft.first_missing(self.prerequisites()) {
            Some(_) => Err(AppError::PrerequisiteMissing(self.missing_message().to_string())),
            None => Ok(()),
        }
    }
}

// =============================================================================
//  PROMPTS
// =============================================================================

pub fn text_prompt(action: AssistAction, d: &CampaignDraft) -> String {
    match action {
        AssistAction::Description => format!(
            "Write a professional and concise product description for a business named \"{}\" in the \"{}\" industry. The description should highlight key services or products offered. Keep it under 50 words.",
            d.business_name, d.business_classification
        ),
        AssistAction::Goal => format!(
            "Based on a business named \"{}\" in the \"{}\" category, described as: \"{}\", suggest a single, clear, and concise primary campaign goal. Provide only the goal text. Example: \"Generate 50 new qualified leads in the next 30 days.\"",
            d.business_name, d.business_classification, d.product_description
        ),
        AssistAction::Kpis => format!(
            "Based on a business named \"{}\" in the \"{}\" category, with a campaign goal of \"{}\", suggest a comma-separated list of 3-4 relevant Key Performance Indicators (KPIs). Provide only the list. Example: \"Cost Per Lead, Conversion Rate, Click-Through Rate\"",
            d.business_name, d.business_classification, d.campaign_goal
        ),
        AssistAction::Competitors => format!(
            "Based on a business named \"{}\" in the \"{}\" category, located at \"{}\", list 3 to 5 main competitors in the same area or niche. Provide only a comma-separated list of names.",
            d.business_name, d.business_classification, d.business_location
        ),
        AssistAction::Location => format!(
            "Based on a marketing campaign for a product described as: \"{}\" with the goal of \"{}\", suggest a primary target location. Examples: \"California, USA\", \"London, UK\", \"Global\". Provide only the location name.",
            d.product_description, d.campaign_goal
        ),
        AssistAction::Age => format!(
            "Based on a marketing campaign for a product described as: \"{}\" with the goal of \"{}\", suggest the ideal target age range. Provide only the range, for example: \"25-45\".",
            d.product_description, d.campaign_goal
        ),
        AssistAction::Interests => format!(
            "Based on a marketing campaign for a product described as: \"{}\" with the goal of \"{}\".\n\
             The target audience is located in \"{}\" and aged \"{}\".\n\
             The main competitors are \"{}\".\n\
             Suggest a detailed list of interests and behaviors for targeting on social media platforms like Facebook and Google Ads.\n\
             Provide the output as a single comma-separated string of keywords. For example: \"digital marketing, small business owners, SaaS, productivity software, tech enthusiasts\".",
            d.product_description, d.campaign_goal, d.location, d.age, d.competitors
        ),
        AssistAction::AdCopy => format!(
            "Write compelling ad copy for a product described as \"{}\".\n\
             The target audience has interests in: \"{}\".\n\
             The campaign goal is: \"{}\".\n\
             The tone should be: \"{}\".\n\
             Provide a catchy headline and a short, persuasive body text with a clear call to action.\n\
             Format the output as:\n\
             Headline: [Your Headline Here]\n\
             Body: [Your Body Text Here]",
            d.product_description, d.interests, d.campaign_goal, d.ad_tone
        ),
        AssistAction::Language => format!(
            "Based on the target location \"{}\", what are the primary languages spoken there? List the most common ones as a comma-separated list. For example: English, Spanish",
            d.location
        ),
        AssistAction::Image => {
            let reference = if d.uploaded_image.is_empty() {
                "Generate a new image from scratch based on the brief."
            } else {
                "VERY IMPORTANT: Use the provided image as a strong visual reference. Modify it or incorporate its key elements and style into the new generation."
            };
            format!(
                "Generate a compelling ad image with the following characteristics:\n\
                 - Style: \"{}\"\n\
                 - Aspect Ratio: \"{}\"\n\
                 - User's creative brief: \"{}\"\n\
                 - The ad copy is: \"{}\"\n\
                 \n\
                 The ad is for a product described as: \"{}\", with a campaign goal of: \"{}\".\n\
                 \n\
                 {}\n\
                 \n\
                 The final image should be vibrant, high-quality, and suitable for a professional online ad campaign.",
                d.image_style, d.aspect_ratio, d.image_prompt, d.ad_copy, d.product_description, d.campaign_goal, reference
            )
        }
        AssistAction::VideoScript => format!(
            "Create a short video ad script.\n\
             Video Length: \"{}\"\n\
             Video Style: \"{}\"\n\
             The ad is based on the following ad copy: \"{}\".\n\
             The product is: \"{}\".\n\
             The goal is: \"{}\".\n\
             Break down the script into scenes with visual descriptions and corresponding voiceover/text on screen.\n\
             Format the output clearly, for example:\n\
             Scene 1: [Visual description]\n\
             Voiceover: [Text]\n\
             \n\
             Scene 2: [Visual description]\n\
             Text on Screen: [Text]",
            d.video_length, d.video_style, d.ad_copy, d.product_description, d.campaign_goal
        ),
        AssistAction::Budget => format!(
            "Based on a marketing campaign for a product described as: \"{}\".\n\
             The campaign objective is: \"{}\" and the specific goal is \"{}\".\n\
             The target audience is located in \"{}\".\n\
             Suggest a reasonable starting daily budget in {} for this campaign to achieve its goals. Provide only the numerical value without currency symbols, commas, or any extra text. For example: 50",
            d.product_description, d.objective, d.campaign_goal, d.location, d.currency
        ),
    }
}

/// Parts for the image call: the reference image (if any) goes first.
pub fn image_request(draft: &CampaignDraft) -> ImageRequest {
    let mut parts = Vec::with_capacity(2);
    if let Some(reference) = InlineImage::from_data_uri(&draft.uploaded_image) {
        parts.push(ContentPart::Image(reference));
    }
    parts.push(ContentPart::Text(text_prompt(AssistAction::Image, draft)));
    ImageRequest { parts }
}

/// Trims the raw output; the budget keeps only its digits.
fn parse_output(action: AssistAction, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let value: String = match action {
        AssistAction::Budget => trimmed.chars().filter(char::is_ascii_digit).collect(),
        _ => trimmed.to_string(),
    };
    if value.is_empty() { None } else { Some(value) }
}

// =============================================================================
//  EXECUÇÃO
// =============================================================================

/// Runs one assist call against `draft` and returns the value for the
/// action's target field. The draft itself is never touched here.
pub async fn run(
    generator: &dyn GenerationService,
    action: AssistAction,
    draft: &CampaignDraft,
) -> Result<String, AppError> {
    action.check_prerequisites(draft)?;

    let outcome = match action {
        AssistAction::Image => generator
            .generate_image(image_request(draft))
            .await
            .map(|image| image.to_data_uri()),
        _ => generator
            .generate_text(TextRequest::new(text_prompt(action, draft)))
            .await,
    };

    match outcome {
        Ok(raw) => parse_output(action, &raw).ok_or_else(|| {
            tracing::warn!(action = action.slug(), "Assist returned no usable value");
            AppError::GenerationFailed(action.failure_message())
        }),
        Err(e) => {
            tracing::warn!(action = action.slug(), generator = generator.name(), error = %e, "Assist call failed");
            Err(AppError::GenerationFailed(action.failure_message()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ScriptedGenerator;
    use chrono::NaiveDate;

    fn draft() -> CampaignDraft {
        CampaignDraft::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    #[test]
    fn action_names_match_route_segments() {
        let action: AssistAction = serde_json::from_str("\"adCopy\"").unwrap();
        assert_eq!(action, AssistAction::AdCopy);
        let action: AssistAction = serde_json::from_str("\"videoScript\"").unwrap();
        assert_eq!(action.target(), DraftField::VideoScript);
    }

    #[tokio::test]
    async fn missing_prerequisite_skips_the_call() {
        let generator = ScriptedGenerator::new();
        let mut d = draft();
        d.product_description = "Artisan coffee".into();

        let err = run(&generator, AssistAction::AdCopy, &d).await.unwrap_err();
        assert!(matches!(err, AppError::PrerequisiteMissing(_)));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn budget_keeps_digits_and_rejects_words() {
        let generator = ScriptedGenerator::new();
        generator.push_text(" ₹1,200 per day\n").push_text("about fifty");
        let mut d = draft();
        d.product_description = "Artisan coffee".into();
        d.campaign_goal = "50 leads".into();
        d.interests = "coffee".into();

        assert_eq!(run(&generator, AssistAction::Budget, &d).await.unwrap(), "1200");
        let err = run(&generator, AssistAction::Budget, &d).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(_)));
        assert!(generator.text_requests()[0].prompt.contains("daily budget in INR"));
    }

    #[tokio::test]
    async fn image_call_sends_reference_first_and_returns_data_uri() {
        let generator = ScriptedGenerator::new();
        generator.push_image(InlineImage { mime_type: "image/png".into(), data: "iVBORw0K".into() });
        let mut d = draft();
        d.image_prompt = "A latte on a desk".into();
        d.uploaded_image = "data:image/jpeg;base64,AAAA".into();

        let uri = run(&generator, AssistAction::Image, &d).await.unwrap();
        assert_eq!(uri, "data:image/png;base64,iVBORw0K");

        let request = &generator.image_requests()[0];
        assert!(matches!(request.parts[0], ContentPart::Image(_)));
        match &request.parts[1] {
            ContentPart::Text(prompt) => assert!(prompt.contains("VERY IMPORTANT")),
            other => panic!("unexpected part {:?}", other),
        }
    }

    #[tokio::test]
    async fn generation_error_becomes_action_message() {
        let generator = ScriptedGenerator::new();
        generator.push_text_failure("quota");
        let mut d = draft();
        d.location = "Paris, France".into();

        match run(&generator, AssistAction::Language, &d).await {
            Err(AppError::GenerationFailed(msg)) => assert!(msg.starts_with("AI language suggestion failed")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
