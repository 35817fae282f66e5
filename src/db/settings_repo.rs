// src/db/settings_repo.rs

use std::collections::BTreeMap;

use crate::{
    common::error::AppError,
    db::store::{keys, Store},
    models::settings::{NotificationPreferences, UserProfile},
};

#[derive(Clone)]
pub struct SettingsRepository {
    store: Store,
}

impl SettingsRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn get_profile(&self) -> UserProfile {
        self.store.load(keys::USER_PROFILE)
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), AppError> {
        self.store.save(keys::USER_PROFILE, profile)
    }

    pub fn get_notifications(&self) -> NotificationPreferences {
        self.store.load(keys::USER_NOTIFICATIONS)
    }

    pub fn save_notifications(&self, prefs: &NotificationPreferences) -> Result<(), AppError> {
        self.store.save(keys::USER_NOTIFICATIONS, prefs)
    }

    // { "meta": true, "zapier": false }
    pub fn get_integrations(&self) -> BTreeMap<String, bool> {
        self.store.load(keys::INTEGRATIONS)
    }

    /// Read-modify-write over the flags. An unreadable value is reported
    /// instead of being replaced.
    pub fn update_integrations<R>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, bool>) -> R,
    ) -> Result<R, AppError> {
        let mut flags: BTreeMap<String, bool> = self.store.load_strict(keys::INTEGRATIONS)?;
        let result = f(&mut flags);
        self.store.save(keys::INTEGRATIONS, &flags)?;
        Ok(result)
    }
}
