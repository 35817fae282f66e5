// src/services/campaign_service.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    common::{error::AppError, ids::IdGenerator},
    db::{CampaignRepository, LeadRepository},
    models::{
        campaign::{Campaign, CampaignStatus},
        wizard::CampaignDraft,
    },
    services::demo_data::{CampaignCounters, DemoDataGenerator},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitReceipt {
    pub campaign: Campaign,
    pub leads_created: usize,
}

#[derive(Clone)]
pub struct CampaignService {
    campaigns: CampaignRepository,
    leads: LeadRepository,
    ids: IdGenerator,
    demo: Arc<DemoDataGenerator>,
}

impl CampaignService {
    pub fn new(
        campaigns: CampaignRepository,
        leads: LeadRepository,
        ids: IdGenerator,
        demo: Arc<DemoDataGenerator>,
    ) -> Self {
        Self { campaigns, leads, ids, demo }
    }

    pub fn list(&self) -> Vec<Campaign> {
        self.campaigns.list_all()
    }

    pub fn get(&self, id: &str) -> Result<Campaign, AppError> {
        self.campaigns.find_by_id(id).ok_or(AppError::CampaignNotFound)
    }

    pub fn delete(&self, id: &str) -> Result<Campaign, AppError> {
        let removed = self.campaigns.delete(id)?;
        tracing::info!(campaign_id = %removed.id, "Campaign deleted");
        Ok(removed)
    }

    // =========================================================================
    //  COMMIT DO WIZARD
    // =========================================================================

    /// Persists a new Active campaign built from `draft`, then its synthetic
    /// leads. If the lead write fails the campaign is removed again, so the
    /// caller can retry with the same draft without creating a duplicate.
    pub fn commit(&self, draft: &CampaignDraft) -> Result<CommitReceipt, AppError> {
        let created_at = Utc::now();

        let existing = self.campaigns.list_all();
        let mut id = self.ids.next_id();
        while existing.iter().any(|c| c.id == id) {
            id = self.ids.next_id();
        }

        let counters = self.demo.campaign_counters();
        let campaign = build_campaign(draft, id, counters, created_at);

        self.campaigns.append(campaign.clone())?;

        let new_leads = self.demo.synthetic_leads(&campaign, created_at);
        let leads_created = new_leads.len();

        if let Err(e) = self.leads.append(new_leads) {
            tracing::warn!(campaign_id = %campaign.id, error = %e, "Lead write failed, removing campaign");
            if let Err(rollback) = self.campaigns.delete(&campaign.id) {
                tracing::error!(campaign_id = %campaign.id, error = %rollback, "Could not remove campaign after failed lead write");
            }
            return Err(e);
        }

        tracing::info!(
            campaign_id = %campaign.id,
            leads = leads_created,
            "✅ Campaign created with synthetic leads"
        );

        Ok(CommitReceipt { campaign, leads_created })
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn build_campaign(
    draft: &CampaignDraft,
    id: String,
    counters: CampaignCounters,
    created_at: DateTime<Utc>,
) -> Campaign {
    Campaign {
        id,
        name: draft.campaign_name.clone(),
        objective: draft.objective.clone(),
        audience: format!(
            "Location: {}, Age: {}, Interests: {}",
            draft.location, draft.age, draft.interests
        ),
        budget: draft.budget.trim().to_string(),
        ad_copy: draft.ad_copy.clone(),
        ad_image_idea: draft.image_prompt.clone(),
        status: CampaignStatus::Active,
        leads: counters.leads,
        impressions: counters.impressions,
        clicks: counters.clicks,
        creation_date: created_at,
        campaign_goal: non_empty(&draft.campaign_goal),
        kpis: non_empty(&draft.kpis),
        competitors: non_empty(&draft.competitors),
        ad_language: non_empty(&draft.ad_language),
        video_script: non_empty(&draft.video_script),
        generated_image_url: non_empty(&draft.generated_image_url),
        video_style: non_empty(&draft.video_style),
        video_length: non_empty(&draft.video_length),
        image_style: non_empty(&draft.image_style),
        aspect_ratio: non_empty(&draft.aspect_ratio),
        business_name: non_empty(&draft.business_name),
        business_location: non_empty(&draft.business_location),
    }
}
