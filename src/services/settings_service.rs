// src/services/settings_service.rs

use crate::{
    common::error::AppError,
    db::SettingsRepository,
    models::settings::{
        IntegrationStatus, NotificationPreferences, PasswordChangePayload, UserProfile, INTEGRATIONS,
    },
};

#[derive(Clone)]
pub struct SettingsService {
    repo: SettingsRepository,
}

impl SettingsService {
    pub fn new(repo: SettingsRepository) -> Self {
        Self { repo }
    }

    // --- PERFIL E NOTIFICAÇÕES ---

    pub fn get_profile(&self) -> UserProfile {
        self.repo.get_profile()
    }

    pub fn update_profile(&self, profile: UserProfile) -> Result<UserProfile, AppError> {
        self.repo.save_profile(&profile)?;
        Ok(profile)
    }

    pub fn get_notifications(&self) -> NotificationPreferences {
        self.repo.get_notifications()
    }

    pub fn update_notifications(
        &self,
        prefs: NotificationPreferences,
    ) -> Result<NotificationPreferences, AppError> {
        self.repo.save_notifications(&prefs)?;
        Ok(prefs)
    }

    /// Checks the new password pair. Nothing is stored: there is no real account.
    pub fn change_password(&self, payload: &PasswordChangePayload) -> Result<(), AppError> {
        if payload.new != payload.confirm {
            return Err(AppError::ValidationError("New passwords do not match.".to_string()));
        }
        if payload.new.chars().count() < 6 {
            return Err(AppError::ValidationError(
                "New password must be at least 6 characters.".to_string(),
            ));
        }
        tracing::info!("Password change accepted (simulated)");
        Ok(())
    }

    // --- INTEGRAÇÕES ---

    pub fn list_integrations(&self) -> Vec<IntegrationStatus> {
        let flags = self.repo.get_integrations();
        INTEGRATIONS
            .iter()
            .map(|integration| IntegrationStatus {
                integration: *integration,
                is_connected: flags.get(integration.id).copied().unwrap_or(false),
            })
            .collect()
    }

    pub fn toggle_integration(&self, id: &str) -> Result<IntegrationStatus, AppError> {
        let integration = INTEGRATIONS
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| AppError::IntegrationNotFound(id.to_string()))?;

        let connected = self.repo.update_integrations(|flags| {
            let connected = !flags.get(id).copied().unwrap_or(false);
            flags.insert(id.to_string(), connected);
            connected
        })?;

        tracing::info!(integration = id, connected, "Integration toggled");
        Ok(IntegrationStatus {
            integration: *integration,
            is_connected: connected,
        })
    }
}
