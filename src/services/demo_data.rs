// src/services/demo_data.rs
//
// Dados de demonstração: contadores plausíveis e leads sintéticos.
// Não é telemetria.

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::sync::Mutex;

use crate::models::{
    campaign::Campaign,
    lead::{Lead, LeadSource, LeadStatus},
};

const FIRST_NAMES: &[&str] = &["Alice", "Bob", "Charlie", "Diana", "Ethan", "Fiona", "George"];
const LAST_NAMES: &[&str] = &["Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller"];

pub const MIN_SYNTHETIC_LEADS: u32 = 5;
pub const MAX_SYNTHETIC_LEADS: u32 = 54;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignCounters {
    pub leads: u32,
    pub impressions: u32,
    pub clicks: u32,
}

pub struct DemoDataGenerator {
    rng: Mutex<StdRng>,
}

impl DemoDataGenerator {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    // Sequência reprodutível (testes)
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn campaign_counters(&self) -> CampaignCounters {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        CampaignCounters {
            leads: rng.gen_range(MIN_SYNTHETIC_LEADS..=MAX_SYNTHETIC_LEADS),
            impressions: rng.gen_range(10_000..60_000),
            clicks: rng.gen_range(500..2_500),
        }
    }

    /// One lead per counted lead of `campaign`, ids `<campaignId>-<ordinal>`.
    pub fn synthetic_leads(&self, campaign: &Campaign, created_at: DateTime<Utc>) -> Vec<Lead> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        (0..campaign.leads)
            .map(|i| {
                let first = FIRST_NAMES.choose(&mut *rng).copied().unwrap_or("Alex");
                let last = LAST_NAMES.choose(&mut *rng).copied().unwrap_or("Doe");
                let phone_suffix: u32 = rng.gen_range(0..100);

                Lead {
                    id: format!("{}-{}", campaign.id, i),
                    name: format!("{} {}", first, last),
                    email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
                    phone: format!("+1 555 01{:02}", phone_suffix),
                    campaign_id: campaign.id.clone(),
                    campaign_name: campaign.name.clone(),
                    status: LeadStatus::New,
                    date: created_at,
                    notes: Vec::new(),
                    chat_history: Vec::new(),
                    reminders: Vec::new(),
                    source: LeadSource::Campaign,
                }
            })
            .collect()
    }
}
