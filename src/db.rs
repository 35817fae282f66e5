pub mod store;
pub use store::{FileStore, KeyValueStore, MemoryStore, Store};
pub mod campaign_repo;
pub use campaign_repo::CampaignRepository;
pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod session_repo;
pub use session_repo::SessionRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
