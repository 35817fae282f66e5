// src/models/settings.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationPreferences {
    #[serde(default = "enabled")]
    pub email: bool,
    #[serde(default)]
    pub push: bool,
}

fn enabled() -> bool {
    true
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self { email: true, push: false }
    }
}

// Troca de senha simulada: só valida, nada é guardado.
// As regras ficam no serviço, na ordem em que são checadas.
#[derive(Debug, Deserialize)]
pub struct PasswordChangePayload {
    #[serde(default)]
    pub current: String,
    #[serde(default)]
    pub new: String,
    #[serde(default)]
    pub confirm: String,
}

// --- INTEGRAÇÕES ---

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Integration {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const INTEGRATIONS: &[Integration] = &[
    Integration {
        id: "meta",
        name: "Meta Ads (Facebook & Instagram)",
        description: "Connect your Meta Ads account to sync campaigns, ad sets, and performance data automatically.",
    },
    Integration {
        id: "google",
        name: "Google Ads",
        description: "Link your Google Ads account to manage search, display, and YouTube campaigns.",
    },
    Integration {
        id: "whatsapp",
        name: "WhatsApp Business",
        description: "Route new leads directly to your WhatsApp Business number for instant conversations.",
    },
    Integration {
        id: "zapier",
        name: "Zapier",
        description: "Connect AdTargetz to thousands of other apps and automate your workflows.",
    },
    Integration {
        id: "payments",
        name: "Payment Gateways",
        description: "Connect Stripe, PayPal, or other gateways to manage payments securely.",
    },
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationStatus {
    #[serde(flatten)]
    pub integration: Integration,
    pub is_connected: bool,
}
