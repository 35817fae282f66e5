// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::lead::Reminder;

// 1. Resumo da Home (os cards do topo + lembretes)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_campaigns: usize,
    pub total_spend: Decimal,
    pub total_leads: u64,
    pub cost_per_lead: Decimal,
    pub upcoming_reminders: Vec<UpcomingReminder>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingReminder {
    pub lead_id: String,
    pub lead_name: String,
    pub reminder: Reminder,
}

// 2. Página de Analytics
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_spend: Decimal,
    pub total_leads: u64,
    pub total_impressions: u64,
    pub total_clicks: u64,
    pub cost_per_lead: Decimal,
    // Em porcentagem
    pub click_through_rate: Decimal,
    pub campaigns: Vec<CampaignPerformance>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPerformance {
    pub id: String,
    pub name: String,
    pub leads: u32,
    pub budget: Decimal,
    pub cost_per_lead: Option<Decimal>,
}
