// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod handlers;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use config::{AppConfig, AppState};
pub use routes::app_router;
