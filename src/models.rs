pub mod auth;
pub mod campaign;
pub mod dashboard;
pub mod lead;
pub mod settings;
pub mod wizard;
