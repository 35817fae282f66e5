// tests/common/mod.rs
#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use adtargetz::{
    config::{AppConfig, AppState},
    db::MemoryStore,
    llm::ScriptedGenerator,
    models::wizard::{DraftField, DraftPatch},
    services::demo_data::DemoDataGenerator,
};

pub struct TestApp {
    pub state: AppState,
    pub backend: Arc<MemoryStore>,
    pub generator: Arc<ScriptedGenerator>,
}

pub fn test_app() -> TestApp {
    let backend = Arc::new(MemoryStore::new());
    let generator = Arc::new(ScriptedGenerator::new());
    let config = AppConfig {
        chat_reply_delay: Duration::from_millis(10),
        ..AppConfig::default()
    };
    let state = AppState::from_parts(
        config,
        backend.clone(),
        generator.clone(),
        Arc::new(DemoDataGenerator::seeded(2024)),
    );
    TestApp { state, backend, generator }
}

pub fn patch(fields: &[(DraftField, &str)]) -> DraftPatch {
    fields.iter().map(|(f, v)| (*f, v.to_string())).collect()
}
