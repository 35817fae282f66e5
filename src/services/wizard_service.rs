// src/services/wizard_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use std::{collections::HashMap, str::FromStr, sync::Arc, time::Duration};
use tokio::{sync::Mutex, time::Instant};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    llm::{GenerationService, InlineImage},
    models::wizard::{
        CampaignDraft, DraftField, DraftPatch, ImageUploadPayload, ImageUploadPurpose,
        VideoUploadPayload, WizardCatalog, WizardStep, WizardView, BUSINESS_CATEGORIES, CURRENCIES,
    },
    services::{
        assist::{self, AssistAction},
        campaign_service::{CampaignService, CommitReceipt},
    },
};

pub const MAX_IMAGE_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

const INVALID_IMAGE_MESSAGE: &str = "Please upload a valid image file (PNG, JPG, etc.).";

const BUSINESS_DETAILS_FIELDS: &[DraftField] = &[
    DraftField::CampaignName,
    DraftField::BusinessName,
    DraftField::BusinessLocation,
    DraftField::BusinessClassification,
    DraftField::ProductDescription,
    DraftField::CampaignGoal,
    DraftField::Kpis,
];

const TARGET_AUDIENCE_FIELDS: &[DraftField] = &[DraftField::Location, DraftField::Age, DraftField::Interests];

// =============================================================================
//  MÁQUINA DE ESTADOS (síncrona, sem IO)
// =============================================================================

#[derive(Debug)]
pub enum WizardOutcome<T> {
    Moved,
    Committed(T),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistOutcome {
    Applied,
    // Uma requisição mais nova para o mesmo campo já foi disparada
    Superseded,
}

#[derive(Debug, Clone)]
pub struct CampaignWizard {
    id: Uuid,
    step_index: usize,
    draft: CampaignDraft,
    message: Option<String>,
    assist_tokens: HashMap<DraftField, Uuid>,
    last_active: Instant,
}

impl CampaignWizard {
    pub fn new(id: Uuid, draft: CampaignDraft) -> Self {
        Self {
            id,
            step_index: 0,
            draft,
            message: None,
            assist_tokens: HashMap::new(),
            last_active: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }

    pub fn step(&self) -> WizardStep {
        WizardStep::ALL[self.step_index]
    }

    pub fn draft(&self) -> &CampaignDraft {
        &self.draft
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_last_step(&self) -> bool {
        self.step_index == WizardStep::ALL.len() - 1
    }

    pub fn view(&self) -> WizardView {
        let step = self.step();
        WizardView {
            id: self.id,
            step_index: self.step_index,
            step,
            step_name: step.name(),
            steps: WizardStep::ALL.iter().map(WizardStep::name).collect(),
            is_last_step: self.is_last_step(),
            draft: self.draft.clone(),
            message: self.message.clone(),
        }
    }

    pub fn update_field(&mut self, field: DraftField, value: String) {
        self.draft.set(field, value);
        self.message = None;
    }

    pub fn apply_patch(&mut self, patch: DraftPatch) {
        for (field, value) in patch {
            self.draft.set(field, value);
        }
        self.message = None;
    }

    pub fn retreat(&mut self) {
        self.step_index = self.step_index.saturating_sub(1);
        self.message = None;
    }

    fn validate_current_step(&self) -> Result<(), &'static str> {
        let d = &self.draft;
        let ok = match self.step() {
            WizardStep::BusinessDetails => d.first_missing(BUSINESS_DETAILS_FIELDS).is_none(),
            WizardStep::TargetAudience => d.first_missing(TARGET_AUDIENCE_FIELDS).is_none(),
            WizardStep::AdCreative => d.is_filled(DraftField::AdCopy),
            WizardStep::AdLanguage => d.is_filled(DraftField::AdLanguage),
            WizardStep::AdBanners => d.is_filled(DraftField::GeneratedImageUrl),
            WizardStep::AdVideos => d.is_filled(DraftField::VideoScript),
            WizardStep::AdBudget => is_positive_number(&d.budget),
        };
        if ok { Ok(()) } else { Err(step_message(self.step())) }
    }

    /// Validates the current step, then moves forward. On the last step the
    /// draft is handed to `commit`; on commit failure the wizard stays put
    /// with the error as its pending message.
    pub fn advance<T, F>(&mut self, commit: F) -> Result<WizardOutcome<T>, AppError>
    where
        F: FnOnce(&CampaignDraft) -> Result<T, AppError>,
    {
        if let Err(msg) = self.validate_current_step() {
            self.message = Some(msg.to_string());
            return Err(AppError::ValidationError(msg.to_string()));
        }

        if !self.is_last_step() {
            self.step_index += 1;
            self.message = None;
            return Ok(WizardOutcome::Moved);
        }

        match commit(&self.draft) {
            Ok(committed) => {
                self.message = None;
                Ok(WizardOutcome::Committed(committed))
            }
            Err(e) => {
                self.message = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Registers a new in-flight request for the action's field and returns
    /// its token plus the draft snapshot the prompt is built from.
    pub fn begin_assist(&mut self, action: AssistAction) -> Result<(Uuid, CampaignDraft), AppError> {
        if let Err(e) = action.check_prerequisites(&self.draft) {
            self.message = Some(e.to_string());
            return Err(e);
        }
        let token = Uuid::new_v4();
        self.assist_tokens.insert(action.target(), token);
        self.message = None;
        Ok((token, self.draft.clone()))
    }

    /// Applies a finished call only if `token` is still the newest one for
    /// the field; stale results are dropped without touching the draft.
    pub fn finish_assist(
        &mut self,
        action: AssistAction,
        token: Uuid,
        result: Result<String, AppError>,
    ) -> Result<AssistOutcome, AppError> {
        let field = action.target();
        if self.assist_tokens.get(&field) != Some(&token) {
            return Ok(AssistOutcome::Superseded);
        }
        self.assist_tokens.remove(&field);

        match result {
            Ok(value) => {
                self.draft.set(field, value);
                self.message = None;
                Ok(AssistOutcome::Applied)
            }
            Err(e) => {
                self.message = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn upload_image(&mut self, payload: ImageUploadPayload) -> Result<(), AppError> {
        let image = match InlineImage::from_data_uri(&payload.data_url) {
            Some(image) if image.mime_type.starts_with("image/") => image,
            _ => return Err(self.reject(INVALID_IMAGE_MESSAGE)),
        };
        let bytes = match image.decode() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(wizard_id = %self.id, error = %e, "Upload is not valid base64");
                return Err(self.reject(INVALID_IMAGE_MESSAGE));
            }
        };
        if bytes.len() > MAX_IMAGE_UPLOAD_BYTES {
            return Err(self.reject("Image file size should not exceed 4MB."));
        }

        let field = match payload.purpose {
            ImageUploadPurpose::Reference => DraftField::UploadedImage,
            ImageUploadPurpose::Creative => DraftField::GeneratedImageUrl,
        };
        self.update_field(field, image.to_data_uri());
        Ok(())
    }

    // Só o nome do arquivo: o vídeo em si não é guardado
    pub fn upload_video(&mut self, payload: VideoUploadPayload) -> Result<(), AppError> {
        if !payload.mime_type.starts_with("video/") {
            return Err(self.reject("Please upload a valid video file."));
        }
        self.update_field(
            DraftField::VideoScript,
            format!("[Uploaded Video File: {}]", payload.file_name),
        );
        Ok(())
    }

    fn reject(&mut self, msg: &str) -> AppError {
        self.message = Some(msg.to_string());
        AppError::ValidationError(msg.to_string())
    }
}

fn step_message(step: WizardStep) -> &'static str {
    match step {
        WizardStep::BusinessDetails => {
            "Please fill out all required fields in Business Details to improve AI accuracy. Competitors are optional."
        }
        WizardStep::TargetAudience => "Please fill out all fields for Target Audience.",
        WizardStep::AdCreative => "Please generate or write your Ad Copy.",
        WizardStep::AdLanguage => "Please provide the ad language(s).",
        WizardStep::AdBanners => "Please generate an ad image or upload your own creative.",
        WizardStep::AdVideos => "Please generate a video script idea or upload a video.",
        WizardStep::AdBudget => "Please enter a valid, positive number for the budget.",
    }
}

fn is_positive_number(raw: &str) -> bool {
    Decimal::from_str(raw.trim())
        .map(|amount| amount > Decimal::ZERO)
        .unwrap_or(false)
}

// =============================================================================
//  SERVIÇO (wizards abertos, indexados por id)
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AdvanceResponse {
    Moved { wizard: WizardView },
    Committed { receipt: CommitReceipt },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistResponse {
    pub applied: bool,
    pub wizard: WizardView,
}

#[derive(Clone)]
pub struct WizardService {
    wizards: Arc<Mutex<HashMap<Uuid, CampaignWizard>>>,
    generator: Arc<dyn GenerationService>,
    campaigns: CampaignService,
    idle_ttl: Duration,
}

impl WizardService {
    pub fn new(
        generator: Arc<dyn GenerationService>,
        campaigns: CampaignService,
        idle_ttl: Duration,
    ) -> Self {
        Self {
            wizards: Arc::new(Mutex::new(HashMap::new())),
            generator,
            campaigns,
            idle_ttl,
        }
    }

    pub fn catalog(&self) -> WizardCatalog {
        WizardCatalog {
            business_categories: BUSINESS_CATEGORIES,
            currencies: CURRENCIES,
        }
    }

    pub async fn open(&self) -> WizardView {
        let id = Uuid::new_v4();
        let wizard = CampaignWizard::new(id, CampaignDraft::new(Utc::now().date_naive()));
        let view = wizard.view();

        let mut wizards = self.wizards.lock().await;
        let before = wizards.len();
        wizards.retain(|_, w| w.idle_for() <= self.idle_ttl);
        if wizards.len() < before {
            tracing::info!(expired = before - wizards.len(), "Idle campaign wizards discarded");
        }
        wizards.insert(id, wizard);
        drop(wizards);

        tracing::info!(wizard_id = %id, "Campaign wizard opened");
        view
    }

    pub async fn view(&self, id: Uuid) -> Result<WizardView, AppError> {
        self.with_wizard(id, |w| Ok(w.view())).await
    }

    pub async fn discard(&self, id: Uuid) -> Result<(), AppError> {
        self.wizards
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::WizardNotFound)
    }

    pub async fn update(&self, id: Uuid, patch: DraftPatch) -> Result<WizardView, AppError> {
        self.with_wizard(id, |w| {
            w.apply_patch(patch);
            Ok(w.view())
        })
        .await
    }

    pub async fn retreat(&self, id: Uuid) -> Result<WizardView, AppError> {
        self.with_wizard(id, |w| {
            w.retreat();
            Ok(w.view())
        })
        .await
    }

    pub async fn advance(&self, id: Uuid) -> Result<AdvanceResponse, AppError> {
        let mut wizards = self.wizards.lock().await;
        let wizard = self.live(&mut wizards, id)?;

        match wizard.advance(|draft| self.campaigns.commit(draft))? {
            WizardOutcome::Moved => Ok(AdvanceResponse::Moved { wizard: wizard.view() }),
            WizardOutcome::Committed(receipt) => {
                // Concluído: o wizard deixa de existir
                wizards.remove(&id);
                Ok(AdvanceResponse::Committed { receipt })
            }
        }
    }

    pub async fn assist(&self, id: Uuid, action: AssistAction) -> Result<AssistResponse, AppError> {
        let (token, snapshot) = {
            let mut wizards = self.wizards.lock().await;
            self.live(&mut wizards, id)?.begin_assist(action)?
        };

        // A trava não fica presa durante a chamada externa
        let result = assist::run(self.generator.as_ref(), action, &snapshot).await;

        let mut wizards = self.wizards.lock().await;
        let wizard = self.live(&mut wizards, id)?;
        let outcome = wizard.finish_assist(action, token, result)?;
        if outcome == AssistOutcome::Superseded {
            tracing::info!(wizard_id = %id, ?action, "Stale assist result dropped");
        }

        Ok(AssistResponse {
            applied: outcome == AssistOutcome::Applied,
            wizard: wizard.view(),
        })
    }

    pub async fn upload_image(&self, id: Uuid, payload: ImageUploadPayload) -> Result<WizardView, AppError> {
        self.with_wizard(id, |w| {
            w.upload_image(payload)?;
            Ok(w.view())
        })
        .await
    }

    pub async fn upload_video(&self, id: Uuid, payload: VideoUploadPayload) -> Result<WizardView, AppError> {
        self.with_wizard(id, |w| {
            w.upload_video(payload)?;
            Ok(w.view())
        })
        .await
    }

    async fn with_wizard<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut CampaignWizard) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let mut wizards = self.wizards.lock().await;
        f(self.live(&mut wizards, id)?)
    }

    // Busca o wizard e renova o prazo; um wizard ocioso demais é descartado
    fn live<'a>(
        &self,
        wizards: &'a mut HashMap<Uuid, CampaignWizard>,
        id: Uuid,
    ) -> Result<&'a mut CampaignWizard, AppError> {
        let idle = wizards.get(&id).ok_or(AppError::WizardNotFound)?.idle_for();
        if idle > self.idle_ttl {
            wizards.remove(&id);
            tracing::info!(wizard_id = %id, "Idle campaign wizard expired");
            return Err(AppError::WizardNotFound);
        }
        let wizard = wizards.get_mut(&id).ok_or(AppError::WizardNotFound)?;
        wizard.touch();
        Ok(wizard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::ids::IdGenerator,
        db::{CampaignRepository, LeadRepository, Store},
        llm::ScriptedGenerator,
        services::demo_data::DemoDataGenerator,
    };
    use chrono::NaiveDate;

    fn service(idle_ttl: Duration) -> WizardService {
        let store = Store::in_memory();
        let campaigns = CampaignService::new(
            CampaignRepository::new(store.clone()),
            LeadRepository::new(store),
            IdGenerator::new(),
            Arc::new(DemoDataGenerator::seeded(7)),
        );
        WizardService::new(Arc::new(ScriptedGenerator::new()), campaigns, idle_ttl)
    }

    fn wizard() -> CampaignWizard {
        CampaignWizard::new(Uuid::new_v4(), CampaignDraft::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()))
    }

    fn no_commit(_: &CampaignDraft) -> Result<(), AppError> {
        panic!("commit must not run before the last step")
    }

    #[test]
    fn failed_validation_keeps_the_step_and_sets_message() {
        let mut w = wizard();
        let err = w.advance(no_commit).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(w.step(), WizardStep::BusinessDetails);
        assert!(w.message().unwrap().contains("Competitors are optional"));

        w.update_field(DraftField::BusinessName, "Acme".into());
        assert_eq!(w.message(), None);
    }

    #[test]
    fn retreat_at_first_step_is_a_no_op() {
        let mut w = wizard();
        w.retreat();
        assert_eq!(w.view().step_index, 0);
    }

    #[test]
    fn budget_must_be_positive() {
        assert!(is_positive_number("250"));
        assert!(is_positive_number(" 12.5 "));
        assert!(!is_positive_number("0"));
        assert!(!is_positive_number("-3"));
        assert!(!is_positive_number("fifty"));
        assert!(!is_positive_number(""));
    }

    #[test]
    fn stale_assist_result_is_dropped() {
        let mut w = wizard();
        w.update_field(DraftField::Location, "Paris, France".into());

        let (first, _) = w.begin_assist(AssistAction::Language).unwrap();
        let (second, _) = w.begin_assist(AssistAction::Language).unwrap();

        let late = w.finish_assist(AssistAction::Language, first, Ok("German".into())).unwrap();
        assert_eq!(late, AssistOutcome::Superseded);
        assert_eq!(w.draft().ad_language, "");

        let fresh = w.finish_assist(AssistAction::Language, second, Ok("French".into())).unwrap();
        assert_eq!(fresh, AssistOutcome::Applied);
        assert_eq!(w.draft().ad_language, "French");
    }

    #[test]
    fn uploads_are_checked() {
        let mut w = wizard();
        let bad = ImageUploadPayload {
            purpose: ImageUploadPurpose::Creative,
            data_url: "data:application/pdf;base64,AAAA".into(),
        };
        assert!(w.upload_image(bad).is_err());
        assert_eq!(w.draft().generated_image_url, "");

        let huge = ImageUploadPayload {
            purpose: ImageUploadPurpose::Creative,
            data_url: format!("data:image/png;base64,{}", "A".repeat(MAX_IMAGE_UPLOAD_BYTES / 3 * 4 + 8)),
        };
        assert_eq!(
            w.upload_image(huge).unwrap_err().to_string(),
            "Image file size should not exceed 4MB."
        );

        let garbage = ImageUploadPayload {
            purpose: ImageUploadPurpose::Creative,
            data_url: "data:image/png;base64,not base64 at all!!".into(),
        };
        assert_eq!(
            w.upload_image(garbage).unwrap_err().to_string(),
            "Please upload a valid image file (PNG, JPG, etc.)."
        );
        assert_eq!(w.draft().generated_image_url, "");

        let ok = ImageUploadPayload {
            purpose: ImageUploadPurpose::Reference,
            data_url: "data:image/jpeg;base64,AAAA".into(),
        };
        w.upload_image(ok).unwrap();
        assert_eq!(w.draft().uploaded_image, "data:image/jpeg;base64,AAAA");

        w.upload_video(VideoUploadPayload { file_name: "promo.mp4".into(), mime_type: "video/mp4".into() })
            .unwrap();
        assert_eq!(w.draft().video_script, "[Uploaded Video File: promo.mp4]");
    }

    #[tokio::test(start_paused = true)]
    async fn idle_wizards_expire() {
        let wizards = service(Duration::from_secs(60));
        let stale = wizards.open().await.id;
        let active = wizards.open().await.id;

        tokio::time::advance(Duration::from_secs(45)).await;
        wizards.view(active).await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;

        assert!(matches!(wizards.view(stale).await, Err(AppError::WizardNotFound)));
        assert!(wizards.view(active).await.is_ok());

        // Abrir um novo também limpa os ociosos
        tokio::time::advance(Duration::from_secs(61)).await;
        let fresh = wizards.open().await.id;
        let open = wizards.wizards.lock().await;
        assert_eq!(open.len(), 1);
        assert!(open.contains_key(&fresh));
    }
}
