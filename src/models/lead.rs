// src/models/lead.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::validation::validate_not_blank;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Lost,
}

impl LeadStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "New" => Some(LeadStatus::New),
            "Contacted" => Some(LeadStatus::Contacted),
            "Qualified" => Some(LeadStatus::Qualified),
            "Lost" => Some(LeadStatus::Lost),
            _ => None,
        }
    }
}

// De onde veio o lead: lote sintético da campanha ou cadastro manual
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeadSource {
    Manual,
    #[default]
    Campaign,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoteType {
    Phone,
    WhatsApp,
    Email,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Lead,
    Ai,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Text,
    Image,
    Video,
}

// --- SUB-COLEÇÕES ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub sender: ChatSender,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub text: String,
    #[serde(deserialize_with = "reminder_date")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub is_completed: bool,
}

// Aceita RFC 3339 ou o valor cru do input datetime-local (tratado como UTC)
pub fn parse_reminder_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

// Lembretes antigos guardam a data como veio do formulário
fn reminder_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_reminder_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid reminder date: {}", raw)))
}

// --- LEAD ---

// Registros antigos podem não ter as sub-coleções: o `default` do serde
// normaliza tudo para vetores vazios na leitura.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub campaign_id: String,
    pub campaign_name: String,
    pub status: LeadStatus,
    pub date: DateTime<Utc>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: Vec<Note>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub chat_history: Vec<ChatMessage>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reminders: Vec<Reminder>,

    #[serde(default)]
    pub source: LeadSource,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Lead {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

// --- FILTROS DA LISTA ---

pub const FILTER_ALL: &str = "all";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadFilter {
    // "all" ou ausente = sem filtro
    pub campaign: Option<String>,
    pub status: Option<String>,
}

impl LeadFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        let campaign_ok = match self.campaign.as_deref() {
            None | Some(FILTER_ALL) => true,
            Some(campaign_id) => lead.campaign_id == campaign_id,
        };
        let status_ok = match self.status.as_deref() {
            None | Some(FILTER_ALL) => true,
            Some(status) => LeadStatus::parse(status) == Some(lead.status),
        };
        campaign_ok && status_ok
    }
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddLeadPayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    #[validate(email(message = "A valid email is required."))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required."))]
    pub phone: String,
    // Vazio ou ausente = "Manual Entry (User Lead)"
    #[serde(default)]
    pub campaign_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusChangePayload {
    pub status: LeadStatus,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddNotePayload {
    #[validate(custom(function = "validate_not_blank", message = "Note text is required."))]
    pub text: String,
    #[serde(rename = "type", default = "default_note_type")]
    pub note_type: NoteType,
}

fn default_note_type() -> NoteType {
    NoteType::Phone
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddReminderPayload {
    #[validate(custom(function = "validate_not_blank", message = "Reminder text is required."))]
    pub text: String,
    // RFC 3339 ou o formato do input datetime-local ("2024-05-01T10:30")
    #[validate(custom(function = "validate_not_blank", message = "Reminder date is required."))]
    pub date: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessagePayload {
    #[validate(custom(function = "validate_not_blank", message = "Message cannot be empty."))]
    pub message: String,
}
