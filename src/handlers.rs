pub mod assistant;
pub mod auth;
pub mod campaigns;
pub mod crm;
pub mod dashboard;
pub mod settings;
pub mod wizard;
