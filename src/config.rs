// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use crate::{
    common::ids::IdGenerator,
    db::{
        CampaignRepository, FileStore, KeyValueStore, LeadRepository, SessionRepository,
        SettingsRepository, Store,
    },
    llm::{GeminiClient, GenerationService},
    services::{
        assistant_service::AssistantService,
        auth::AuthService,
        campaign_service::CampaignService,
        crm_service::{CannedLeadResponder, CrmService},
        dashboard_service::DashboardService,
        demo_data::DemoDataGenerator,
        settings_service::SettingsService,
        wizard_service::WizardService,
    },
};

// Configuração lida do ambiente (.env incluso)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub api_key: Option<String>,
    pub gemini_api_base: String,
    pub text_model: String,
    pub image_model: String,
    pub chat_reply_delay: Duration,
    // Wizards sem uso por mais que isso são descartados
    pub wizard_idle_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            data_dir: PathBuf::from("./data"),
            api_key: None,
            gemini_api_base: "https://generativelanguage.googleapis.com".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            chat_reply_delay: Duration::from_millis(2_000),
            wizard_idle_ttl: Duration::from_secs(2 * 60 * 60),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let chat_reply_delay = match env::var("CHAT_REPLY_DELAY_MS") {
            Ok(raw) => Duration::from_millis(
                raw.parse()
                    .map_err(|e| anyhow::anyhow!("CHAT_REPLY_DELAY_MS inválido ({}): {}", raw, e))?,
            ),
            Err(_) => defaults.chat_reply_delay,
        };

        let wizard_idle_ttl = match env::var("WIZARD_IDLE_MINUTES") {
            Ok(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .map_err(|e| anyhow::anyhow!("WIZARD_IDLE_MINUTES inválido ({}): {}", raw, e))?
                    * 60,
            ),
            Err(_) => defaults.wizard_idle_ttl,
        };

        Ok(Self {
            bind_addr: env::var("ADTARGETZ_BIND_ADDR").unwrap_or(defaults.bind_addr),
            data_dir: env::var("ADTARGETZ_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            api_key: env::var("API_KEY").ok().filter(|k| !k.trim().is_empty()),
            gemini_api_base: env::var("GEMINI_API_BASE").unwrap_or(defaults.gemini_api_base),
            text_model: env::var("GEMINI_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: env::var("GEMINI_IMAGE_MODEL").unwrap_or(defaults.image_model),
            chat_reply_delay,
            wizard_idle_ttl,
        })
    }
}

// O contexto da aplicação, injetado em todos os handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth_service: AuthService,
    pub campaign_service: CampaignService,
    pub wizard_service: WizardService,
    pub crm_service: CrmService,
    pub dashboard_service: DashboardService,
    pub settings_service: SettingsService,
    pub assistant_service: AssistantService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let backend = FileStore::open(&config.data_dir)
            .map_err(|e| anyhow::anyhow!("Falha ao abrir {}: {}", config.data_dir.display(), e))?;
        tracing::info!("✅ Armazenamento aberto em {}", config.data_dir.display());

        if config.api_key.is_none() {
            tracing::warn!("API_KEY não definida: as ações de IA vão falhar");
        }

        let generator = GeminiClient::new(
            config.api_key.clone(),
            config.gemini_api_base.clone(),
            config.text_model.clone(),
            config.image_model.clone(),
        );

        Ok(Self::from_parts(
            config,
            Arc::new(backend),
            Arc::new(generator),
            Arc::new(DemoDataGenerator::from_entropy()),
        ))
    }

    /// Assembles the dependency graph over any store backend and generator.
    pub fn from_parts(
        config: AppConfig,
        backend: Arc<dyn KeyValueStore>,
        generator: Arc<dyn GenerationService>,
        demo: Arc<DemoDataGenerator>,
    ) -> Self {
        let store = Store::new(backend);
        let ids = IdGenerator::new();

        // --- Monta o gráfico de dependências ---
        let campaign_repo = CampaignRepository::new(store.clone());
        let lead_repo = LeadRepository::new(store.clone());

        let auth_service = AuthService::new(SessionRepository::new(store.clone()));
        auth_service.restore();

        let campaign_service =
            CampaignService::new(campaign_repo.clone(), lead_repo.clone(), ids.clone(), demo);
        let wizard_service = WizardService::new(
            generator.clone(),
            campaign_service.clone(),
            config.wizard_idle_ttl,
        );
        let crm_service = CrmService::new(
            lead_repo.clone(),
            campaign_repo.clone(),
            ids,
            Arc::new(CannedLeadResponder),
            config.chat_reply_delay,
        );
        let dashboard_service = DashboardService::new(campaign_repo, lead_repo);
        let settings_service = SettingsService::new(SettingsRepository::new(store));
        let assistant_service = AssistantService::new(generator);

        Self {
            config: Arc::new(config),
            auth_service,
            campaign_service,
            wizard_service,
            crm_service,
            dashboard_service,
            settings_service,
            assistant_service,
        }
    }
}
