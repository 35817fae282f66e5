// src/services/dashboard_service.rs

use rust_decimal::Decimal;

use crate::{
    db::{CampaignRepository, LeadRepository},
    models::{
        campaign::Campaign,
        dashboard::{AnalyticsReport, CampaignPerformance, DashboardSummary, UpcomingReminder},
        lead::Lead,
    },
};

const UPCOMING_REMINDERS_LIMIT: usize = 5;

#[derive(Clone)]
pub struct DashboardService {
    campaigns: CampaignRepository,
    leads: LeadRepository,
}

impl DashboardService {
    pub fn new(campaigns: CampaignRepository, leads: LeadRepository) -> Self {
        Self { campaigns, leads }
    }

    pub fn get_summary(&self) -> DashboardSummary {
        let campaigns = self.campaigns.list_all();
        let leads = self.leads.list_all();
        let totals = Totals::of(&campaigns);

        DashboardSummary {
            total_campaigns: campaigns.len(),
            total_spend: totals.spend,
            total_leads: totals.leads,
            cost_per_lead: totals.cost_per_lead(),
            upcoming_reminders: upcoming_reminders(&leads, UPCOMING_REMINDERS_LIMIT),
        }
    }

    pub fn get_analytics(&self) -> AnalyticsReport {
        let campaigns = self.campaigns.list_all();
        let totals = Totals::of(&campaigns);

        let click_through_rate = if totals.impressions > 0 {
            (Decimal::from(totals.clicks) / Decimal::from(totals.impressions) * Decimal::ONE_HUNDRED).round_dp(2)
        } else {
            Decimal::ZERO
        };

        AnalyticsReport {
            total_spend: totals.spend,
            total_leads: totals.leads,
            total_impressions: totals.impressions,
            total_clicks: totals.clicks,
            cost_per_lead: totals.cost_per_lead(),
            click_through_rate,
            campaigns: campaigns
                .iter()
                .map(|c| CampaignPerformance {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    leads: c.leads,
                    budget: c.budget_amount(),
                    cost_per_lead: c.cost_per_lead(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default)]
struct Totals {
    spend: Decimal,
    leads: u64,
    impressions: u64,
    clicks: u64,
}

impl Totals {
    fn of(campaigns: &[Campaign]) -> Self {
        campaigns.iter().fold(Totals::default(), |mut t, c| {
            t.spend += c.budget_amount();
            t.leads += u64::from(c.leads);
            t.impressions += u64::from(c.impressions);
            t.clicks += u64::from(c.clicks);
            t
        })
    }

    // Zero quando ainda não há leads
    fn cost_per_lead(&self) -> Decimal {
        if self.leads == 0 {
            return Decimal::ZERO;
        }
        (self.spend / Decimal::from(self.leads)).round_dp(2)
    }
}

/// Earliest incomplete reminders across all leads.
fn upcoming_reminders(leads: &[Lead], limit: usize) -> Vec<UpcomingReminder> {
    let mut pending: Vec<UpcomingReminder> = leads
        .iter()
        .flat_map(|lead| {
            lead.reminders
                .iter()
                .filter(|r| !r.is_completed)
                .map(move |r| UpcomingReminder {
                    lead_id: lead.id.clone(),
                    lead_name: lead.name.clone(),
                    reminder: r.clone(),
                })
        })
        .collect();
    pending.sort_by(|a, b| a.reminder.date.cmp(&b.reminder.date));
    pending.truncate(limit);
    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lead::{LeadSource, LeadStatus, Reminder};
    use chrono::{Duration, Utc};

    fn lead_with_reminders(name: &str, offsets_and_done: &[(i64, bool)]) -> Lead {
        let now = Utc::now();
        Lead {
            id: name.to_lowercase(),
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "+1 555 0100".into(),
            campaign_id: "manual".into(),
            campaign_name: "User Added".into(),
            status: LeadStatus::New,
            date: now,
            notes: Vec::new(),
            chat_history: Vec::new(),
            reminders: offsets_and_done
                .iter()
                .enumerate()
                .map(|(i, (hours, done))| Reminder {
                    id: format!("{}-{}", name, i),
                    text: "Follow up".into(),
                    date: now + Duration::hours(*hours),
                    is_completed: *done,
                })
                .collect(),
            source: LeadSource::Manual,
        }
    }

    #[test]
    fn upcoming_skips_completed_and_keeps_five_earliest() {
        let leads = vec![
            lead_with_reminders("Alice", &[(5, false), (1, true), (7, false)]),
            lead_with_reminders("Bob", &[(2, false), (3, false), (4, false), (9, false)]),
        ];
        let upcoming = upcoming_reminders(&leads, 5);

        assert_eq!(upcoming.len(), 5);
        assert!(upcoming.iter().all(|u| !u.reminder.is_completed));
        assert!(upcoming.windows(2).all(|w| w[0].reminder.date <= w[1].reminder.date));
        assert_eq!(upcoming[0].lead_name, "Bob");
        assert!(!upcoming.iter().any(|u| u.reminder.id == "Bob-3"));
    }

    #[test]
    fn cost_per_lead_is_zero_without_leads() {
        assert_eq!(Totals::default().cost_per_lead(), Decimal::ZERO);
        let totals = Totals { spend: Decimal::from(100), leads: 3, ..Default::default() };
        assert_eq!(totals.cost_per_lead().to_string(), "33.33");
    }
}
