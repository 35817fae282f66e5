// src/models/campaign.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CampaignStatus {
    Active,
    Paused,
    Ended,
}

// --- CAMPANHA ---

// `id` e `creation_date` nunca mudam depois da criação.
// Os contadores só são definidos no commit do wizard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub objective: String,
    pub audience: String,

    // Guardado como texto, igual ao formulário
    pub budget: String,

    pub ad_copy: String,
    pub ad_image_idea: String,
    pub status: CampaignStatus,

    pub leads: u32,
    pub impressions: u32,
    pub clicks: u32,
    pub creation_date: DateTime<Utc>,

    // Campos coletados pelo wizard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kpis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_location: Option<String>,
}

impl Campaign {
    /// Budget as a number. Anything that does not parse counts as zero,
    /// the same way the dashboard totals treat it.
    pub fn budget_amount(&self) -> Decimal {
        Decimal::from_str(self.budget.trim()).unwrap_or(Decimal::ZERO)
    }

    /// Budget divided by generated leads, `None` when the campaign has no leads.
    pub fn cost_per_lead(&self) -> Option<Decimal> {
        if self.leads == 0 {
            return None;
        }
        Some((self.budget_amount() / Decimal::from(self.leads)).round_dp(2))
    }
}
