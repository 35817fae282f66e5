// src/services/crm_service.rs

use async_trait::async_trait;
use chrono::Utc;
use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;

use crate::{
    common::{error::AppError, ids::IdGenerator},
    db::{CampaignRepository, LeadRepository},
    models::lead::{
        parse_reminder_date, AddLeadPayload, AddNotePayload, AddReminderPayload, ChatMessage, ChatSender,
        Lead, LeadFilter, LeadSource, LeadStatus, MediaType, Note, Reminder,
    },
};

pub const MANUAL_CAMPAIGN_ID: &str = "manual";
pub const MANUAL_CAMPAIGN_NAME: &str = "User Added";

const BROCHURE_TEXT: &str = "Here is the business brochure and portfolio you requested.";
const BROCHURE_URL: &str = "AdTargetz_Portfolio.pdf";

// =============================================================================
//  RESPOSTA SIMULADA DO LEAD
// =============================================================================

/// Produces the lead's side of a chat. Nothing is sent anywhere.
#[async_trait]
pub trait LeadResponder: Send + Sync {
    async fn reply_to(&self, lead: &Lead, message: &str) -> String;
}

pub struct CannedLeadResponder;

#[async_trait]
impl LeadResponder for CannedLeadResponder {
    async fn reply_to(&self, _lead: &Lead, _message: &str) -> String {
        "Thanks for sending that over. I'll take a look and let you know.".to_string()
    }
}

#[derive(Clone)]
pub struct CrmService {
    leads: LeadRepository,
    campaigns: CampaignRepository,
    ids: IdGenerator,
    responder: Arc<dyn LeadResponder>,
    reply_delay: Duration,
}

impl CrmService {
    pub fn new(
        leads: LeadRepository,
        campaigns: CampaignRepository,
        ids: IdGenerator,
        responder: Arc<dyn LeadResponder>,
        reply_delay: Duration,
    ) -> Self {
        Self { leads, campaigns, ids, responder, reply_delay }
    }

    // =========================================================================
    //  1. LISTA E CADASTRO
    // =========================================================================

    /// Leads matching `filter`, newest first.
    pub fn list(&self, filter: &LeadFilter) -> Vec<Lead> {
        let mut leads: Vec<Lead> = self
            .leads
            .list_all()
            .into_iter()
            .filter(|l| filter.matches(l))
            .collect();
        leads.sort_by(|a, b| b.date.cmp(&a.date));
        leads
    }

    pub fn get(&self, id: &str) -> Result<Lead, AppError> {
        self.leads.find_by_id(id).ok_or(AppError::LeadNotFound)
    }

    pub fn add_manual_lead(&self, payload: AddLeadPayload) -> Result<Lead, AppError> {
        let campaign_id = payload
            .campaign_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| MANUAL_CAMPAIGN_ID.to_string());

        let campaign_name = self
            .campaigns
            .find_by_id(&campaign_id)
            .map(|c| c.name)
            .unwrap_or_else(|| MANUAL_CAMPAIGN_NAME.to_string());

        let lead = Lead {
            id: format!("manual-{}", self.ids.next_millis()),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            campaign_id,
            campaign_name,
            status: LeadStatus::New,
            date: Utc::now(),
            notes: Vec::new(),
            chat_history: Vec::new(),
            reminders: Vec::new(),
            source: LeadSource::Manual,
        };

        self.leads.prepend(lead.clone())?;
        tracing::info!(lead_id = %lead.id, "Manual lead added");
        Ok(lead)
    }

    // =========================================================================
    //  2. DETALHE: STATUS, NOTAS, LEMBRETES
    // =========================================================================

    pub fn change_status(&self, id: &str, status: LeadStatus) -> Result<Lead, AppError> {
        self.leads.update_lead(id, |lead| {
            lead.status = status;
            Ok(lead.clone())
        })
    }

    // Nota mais recente primeiro
    pub fn add_note(&self, id: &str, payload: AddNotePayload) -> Result<Note, AppError> {
        let note = Note {
            id: self.ids.next_id(),
            text: payload.text,
            note_type: payload.note_type,
            date: Utc::now(),
        };
        self.leads.update_lead(id, |lead| {
            lead.notes.insert(0, note.clone());
            Ok(())
        })?;
        Ok(note)
    }

    pub fn add_reminder(&self, id: &str, payload: AddReminderPayload) -> Result<Lead, AppError> {
        let date = parse_reminder_date(&payload.date).ok_or_else(|| {
            AppError::ValidationError("Please provide a valid date and time for the reminder.".to_string())
        })?;
        let reminder = Reminder {
            id: self.ids.next_id(),
            text: payload.text,
            date,
            is_completed: false,
        };
        self.leads.update_lead(id, |lead| {
            lead.reminders.push(reminder);
            lead.reminders.sort_by(|a, b| a.date.cmp(&b.date));
            Ok(lead.clone())
        })
    }

    pub fn toggle_reminder(&self, id: &str, reminder_id: &str) -> Result<Reminder, AppError> {
        self.leads.update_lead(id, |lead| {
            let reminder = lead
                .reminders
                .iter_mut()
                .find(|r| r.id == reminder_id)
                .ok_or(AppError::ReminderNotFound)?;
            reminder.is_completed = !reminder.is_completed;
            Ok(reminder.clone())
        })
    }

    // =========================================================================
    //  3. CHAT
    // =========================================================================

    /// Appends the user's message now and schedules the lead's reply after
    /// the configured delay. The handle resolves once the reply is stored.
    pub fn send_message(&self, id: &str, text: String) -> Result<(ChatMessage, JoinHandle<()>), AppError> {
        let message = self.chat_message(ChatSender::User, text, None, None);
        let lead = self.leads.update_lead(id, |lead| {
            lead.chat_history.push(message.clone());
            Ok(lead.clone())
        })?;

        let service = self.clone();
        let sent = message.message.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(service.reply_delay).await;
            let text = service.responder.reply_to(&lead, &sent).await;
            let reply = service.chat_message(ChatSender::Lead, text, None, None);
            if let Err(e) = service.leads.update_lead(&lead.id, |l| {
                l.chat_history.push(reply);
                Ok(())
            }) {
                tracing::warn!(lead_id = %lead.id, error = %e, "Could not store simulated reply");
            }
        });

        Ok((message, handle))
    }

    pub fn send_brochure(&self, id: &str) -> Result<ChatMessage, AppError> {
        let message = self.chat_message(
            ChatSender::User,
            BROCHURE_TEXT.to_string(),
            Some(MediaType::Image),
            Some(BROCHURE_URL.to_string()),
        );
        self.leads.update_lead(id, |lead| {
            lead.chat_history.push(message.clone());
            Ok(())
        })?;
        Ok(message)
    }

    /// Opening message from the assistant; only allowed on an empty chat.
    pub fn send_welcome(&self, id: &str) -> Result<ChatMessage, AppError> {
        self.leads.update_lead(id, |lead| {
            if !lead.chat_history.is_empty() {
                return Err(AppError::ValidationError(
                    "The conversation has already started.".to_string(),
                ));
            }
            let text = format!(
                "Hello {}, thank you for your interest in {}. Would you like to see our pricing plans?",
                lead.first_name(),
                lead.campaign_name
            );
            let message = self.chat_message(ChatSender::Ai, text, None, None);
            lead.chat_history.push(message.clone());
            Ok(message)
        })
    }

    fn chat_message(
        &self,
        sender: ChatSender,
        message: String,
        media_type: Option<MediaType>,
        media_url: Option<String>,
    ) -> ChatMessage {
        ChatMessage {
            id: self.ids.next_id(),
            sender,
            message,
            timestamp: Utc::now(),
            media_type,
            media_url,
        }
    }
}
