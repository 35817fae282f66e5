// src/models/wizard.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// --- ETAPAS ---

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    BusinessDetails,
    TargetAudience,
    AdCreative,
    AdLanguage,
    AdBanners,
    AdVideos,
    AdBudget,
}

impl WizardStep {
    pub const ALL: [WizardStep; 7] = [
        WizardStep::BusinessDetails,
        WizardStep::TargetAudience,
        WizardStep::AdCreative,
        WizardStep::AdLanguage,
        WizardStep::AdBanners,
        WizardStep::AdVideos,
        WizardStep::AdBudget,
    ];

    pub fn at(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            WizardStep::BusinessDetails => "Business Details",
            WizardStep::TargetAudience => "Target Audience",
            WizardStep::AdCreative => "Ad Creative",
            WizardStep::AdLanguage => "Ad Language",
            WizardStep::AdBanners => "Ad Banners",
            WizardStep::AdVideos => "Ad Videos",
            WizardStep::AdBudget => "Ad Budget",
        }
    }
}

// --- CAMPOS DO RASCUNHO ---

// Um campo do rascunho, com o mesmo nome usado no JSON.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    CampaignName,
    BusinessName,
    BusinessLocation,
    BusinessClassification,
    ProductDescription,
    CampaignGoal,
    Kpis,
    Competitors,
    Location,
    Age,
    Interests,
    AdCopy,
    AdTone,
    AdLanguage,
    ImagePrompt,
    GeneratedImageUrl,
    UploadedImage,
    VideoScript,
    VideoStyle,
    VideoLength,
    ImageStyle,
    AspectRatio,
    Budget,
    Currency,
    Objective,
}

impl DraftField {
    /// Human label used in prerequisite messages.
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::CampaignName => "Campaign Name",
            DraftField::BusinessName => "Business Name",
            DraftField::BusinessLocation => "Business Location",
            DraftField::BusinessClassification => "Category",
            DraftField::ProductDescription => "Product Description",
            DraftField::CampaignGoal => "Campaign Goal",
            DraftField::Kpis => "KPIs",
            DraftField::Competitors => "Competitors",
            DraftField::Location => "Location",
            DraftField::Age => "Age Range",
            DraftField::Interests => "Interests",
            DraftField::AdCopy => "Ad Copy",
            DraftField::AdTone => "Tone of Voice",
            DraftField::AdLanguage => "Languages",
            DraftField::ImagePrompt => "Creative Brief",
            DraftField::GeneratedImageUrl => "Ad Image",
            DraftField::UploadedImage => "Reference Image",
            DraftField::VideoScript => "Video Script",
            DraftField::VideoStyle => "Video Style",
            DraftField::VideoLength => "Video Length",
            DraftField::ImageStyle => "Image Style",
            DraftField::AspectRatio => "Aspect Ratio",
            DraftField::Budget => "Budget",
            DraftField::Currency => "Currency",
            DraftField::Objective => "Objective",
        }
    }
}

// Atualização parcial: { "businessName": "Acme", "age": "25-45" }
pub type DraftPatch = BTreeMap<DraftField, String>;

// --- RASCUNHO ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    pub campaign_name: String,
    pub business_name: String,
    pub business_location: String,
    pub business_classification: String,
    pub product_description: String,
    pub campaign_goal: String,
    pub kpis: String,
    pub competitors: String,
    pub location: String,
    pub age: String,
    pub interests: String,
    pub ad_copy: String,
    pub ad_tone: String,
    pub ad_language: String,
    pub image_prompt: String,
    pub generated_image_url: String,
    pub uploaded_image: String,
    pub video_script: String,
    pub video_style: String,
    pub video_length: String,
    pub image_style: String,
    pub aspect_ratio: String,
    pub budget: String,
    pub currency: String,
    pub objective: String,
}

impl CampaignDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            campaign_name: format!("New Campaign {}", today.format("%-m/%-d/%Y")),
            business_name: String::new(),
            business_location: String::new(),
            business_classification: String::new(),
            product_description: String::new(),
            campaign_goal: String::new(),
            kpis: String::new(),
            competitors: String::new(),
            location: String::new(),
            age: String::new(),
            interests: String::new(),
            ad_copy: String::new(),
            ad_tone: "Professional".to_string(),
            ad_language: String::new(),
            image_prompt: String::new(),
            generated_image_url: String::new(),
            uploaded_image: String::new(),
            video_script: String::new(),
            video_style: "Modern & Fast-Paced".to_string(),
            video_length: "15 seconds".to_string(),
            image_style: "Photorealistic".to_string(),
            aspect_ratio: "1:1 Square".to_string(),
            budget: "500".to_string(),
            currency: "INR".to_string(),
            objective: "Lead Generation".to_string(),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::CampaignName => &self.campaign_name,
            DraftField::BusinessName => &self.business_name,
            DraftField::BusinessLocation => &self.business_location,
            DraftField::BusinessClassification => &self.business_classification,
            DraftField::ProductDescription => &self.product_description,
            DraftField::CampaignGoal => &self.campaign_goal,
            DraftField::Kpis => &self.kpis,
            DraftField::Competitors => &self.competitors,
            DraftField::Location => &self.location,
            DraftField::Age => &self.age,
            DraftField::Interests => &self.interests,
            DraftField::AdCopy => &self.ad_copy,
            DraftField::AdTone => &self.ad_tone,
            DraftField::AdLanguage => &self.ad_language,
            DraftField::ImagePrompt => &self.image_prompt,
            DraftField::GeneratedImageUrl => &self.generated_image_url,
            DraftField::UploadedImage => &self.uploaded_image,
            DraftField::VideoScript => &self.video_script,
            DraftField::VideoStyle => &self.video_style,
            DraftField::VideoLength => &self.video_length,
            DraftField::ImageStyle => &self.image_style,
            DraftField::AspectRatio => &self.aspect_ratio,
            DraftField::Budget => &self.budget,
            DraftField::Currency => &self.currency,
            DraftField::Objective => &self.objective,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        let slot = match field {
            DraftField::CampaignName => &mut self.campaign_name,
            DraftField::BusinessName => &mut self.business_name,
            DraftField::BusinessLocation => &mut self.business_location,
            DraftField::BusinessClassification => &mut self.business_classification,
            DraftField::ProductDescription => &mut self.product_description,
            DraftField::CampaignGoal => &mut self.campaign_goal,
            DraftField::Kpis => &mut self.kpis,
            DraftField::Competitors => &mut self.competitors,
            DraftField::Location => &mut self.location,
            DraftField::Age => &mut self.age,
            DraftField::Interests => &mut self.interests,
            DraftField::AdCopy => &mut self.ad_copy,
            DraftField::AdTone => &mut self.ad_tone,
            DraftField::AdLanguage => &mut self.ad_language,
            DraftField::ImagePrompt => &mut self.image_prompt,
            DraftField::GeneratedImageUrl => &mut self.generated_image_url,
            DraftField::UploadedImage => &mut self.uploaded_image,
            DraftField::VideoScript => &mut self.video_script,
            DraftField::VideoStyle => &mut self.video_style,
            DraftField::VideoLength => &mut self.video_length,
            DraftField::ImageStyle => &mut self.image_style,
            DraftField::AspectRatio => &mut self.aspect_ratio,
            DraftField::Budget => &mut self.budget,
            DraftField::Currency => &mut self.currency,
            DraftField::Objective => &mut self.objective,
        };
        *slot = value;
    }

    pub fn is_filled(&self, field: DraftField) -> bool {
        !self.get(field).is_empty()
    }

    /// First field in `fields` that is still empty.
    pub fn first_missing(&self, fields: &[DraftField]) -> Option<DraftField> {
        fields.iter().copied().find(|f| !self.is_filled(*f))
    }
}

// --- UPLOADS ---

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageUploadPurpose {
    // Imagem de referência para o gerador
    Reference,
    // Criativo final enviado pelo usuário
    Creative,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadPayload {
    pub purpose: ImageUploadPurpose,
    // Resultado do FileReader: "data:image/png;base64,...."
    pub data_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoUploadPayload {
    pub file_name: String,
    pub mime_type: String,
}

// --- VISÃO DO WIZARD (resposta HTTP) ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub id: Uuid,
    pub step_index: usize,
    pub step: WizardStep,
    pub step_name: &'static str,
    pub steps: Vec<&'static str>,
    pub is_last_step: bool,
    pub draft: CampaignDraft,
    // Mensagem de erro pendente (mostrada inline)
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

pub const CURRENCIES: &[Currency] = &[
    Currency { code: "INR", symbol: "₹", name: "Indian Rupee" },
    Currency { code: "USD", symbol: "$", name: "US Dollar" },
    Currency { code: "EUR", symbol: "€", name: "Euro" },
    Currency { code: "GBP", symbol: "£", name: "British Pound" },
    Currency { code: "AED", symbol: "AED", name: "UAE Dirham" },
    Currency { code: "AUD", symbol: "A$", name: "Australian Dollar" },
    Currency { code: "CAD", symbol: "C$", name: "Canadian Dollar" },
];

pub const BUSINESS_CATEGORIES: &[&str] = &[
    "Accounting & Tax Services", "Advertising & Marketing", "Agriculture",
    "Architecture & Interior Design", "Arts & Crafts", "Automotive", "Beauty & Cosmetics",
    "Child Care", "Cleaning Services", "Coaching & Consulting",
    "Construction & Home Improvement", "E-commerce (General)", "Education & Tutoring",
    "Electronics", "Entertainment & Events", "Environmental Services", "Fashion & Apparel",
    "Financial Services", "Fitness & Gyms", "Food & Beverage (Restaurants, Cafes)", "Gaming",
    "Healthcare & Medical", "Hospitality (Hotels, Resorts)", "Human Resources", "Insurance",
    "IT Services & Tech Support", "Jewelry & Accessories", "Landscaping & Gardening",
    "Legal Services", "Manufacturing", "Non-Profit", "Pet Services",
    "Photography & Videography", "Real Estate", "Recruitment", "Retail (Brick & Mortar)",
    "SaaS (Software as a Service)", "Security Services", "Social Media & Influencers",
    "Sports & Recreation", "Telecommunications", "Transportation & Logistics",
    "Travel & Tourism", "Veterinary Services", "Web Design & Development", "Wellness & Spas",
    "Other",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardCatalog {
    pub business_categories: &'static [&'static str],
    pub currencies: &'static [Currency],
}
