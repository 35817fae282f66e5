// src/db/campaign_repo.rs

use std::sync::{Arc, Mutex};

use crate::{
    common::error::AppError,
    db::store::{keys, Store},
    models::campaign::Campaign,
};

#[derive(Clone)]
pub struct CampaignRepository {
    store: Store,
    write_lock: Arc<Mutex<()>>,
}

impl CampaignRepository {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn list_all(&self) -> Vec<Campaign> {
        self.store.load(keys::CAMPAIGNS)
    }

    pub fn find_by_id(&self, id: &str) -> Option<Campaign> {
        self.list_all().into_iter().find(|c| c.id == id)
    }

    // Leitura estrita: um registro ilegível nunca é sobrescrito
    fn load_for_write(&self) -> Result<Vec<Campaign>, AppError> {
        self.store.load_strict(keys::CAMPAIGNS)
    }

    pub fn append(&self, campaign: Campaign) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut campaigns = self.load_for_write()?;
        campaigns.push(campaign);
        self.store.save(keys::CAMPAIGNS, &campaigns)
    }

    // Remove a campanha. Os leads dela continuam (sem cascata).
    pub fn delete(&self, id: &str) -> Result<Campaign, AppError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut campaigns = self.load_for_write()?;
        let position = campaigns
            .iter()
            .position(|c| c.id == id)
            .ok_or(AppError::CampaignNotFound)?;
        let removed = campaigns.remove(position);
        self.store.save(keys::CAMPAIGNS, &campaigns)?;
        Ok(removed)
    }
}
