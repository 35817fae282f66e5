pub mod assist;
pub mod assistant_service;
pub mod auth;
pub mod campaign_service;
pub mod crm_service;
pub mod dashboard_service;
pub mod demo_data;
pub mod settings_service;
pub mod wizard_service;
