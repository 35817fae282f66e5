// tests/wizard_flow.rs

mod common;

use adtargetz::{
    common::error::AppError,
    db::{store::keys, KeyValueStore},
    models::{
        campaign::CampaignStatus,
        lead::{AddLeadPayload, LeadFilter, LeadSource, LeadStatus},
        wizard::{DraftField, ImageUploadPayload, ImageUploadPurpose, VideoUploadPayload, WizardStep},
    },
    services::{assist::AssistAction, wizard_service::AdvanceResponse},
};
use common::{patch, test_app};

#[tokio::test]
async fn full_wizard_commits_campaign_with_synthetic_leads() {
    let app = test_app();
    let wizards = &app.state.wizard_service;
    let id = wizards.open().await.id;

    wizards
        .update(
            id,
            patch(&[
                (DraftField::CampaignName, "Spring Launch"),
                (DraftField::BusinessName, "Bean There"),
                (DraftField::BusinessLocation, "Pune, India"),
                (DraftField::BusinessClassification, "Food & Beverage (Restaurants, Cafes)"),
                (DraftField::ProductDescription, "Specialty coffee roasted in-house."),
                (DraftField::CampaignGoal, "Generate 50 leads in 30 days"),
                (DraftField::Kpis, "Cost Per Lead, Conversion Rate"),
            ]),
        )
        .await
        .unwrap();
    assert!(matches!(wizards.advance(id).await.unwrap(), AdvanceResponse::Moved { .. }));

    wizards
        .update(
            id,
            patch(&[
                (DraftField::Location, "Pune, India"),
                (DraftField::Age, "22-40"),
                (DraftField::Interests, "coffee, cafes, remote work"),
            ]),
        )
        .await
        .unwrap();
    wizards.advance(id).await.unwrap();

    wizards.update(id, patch(&[(DraftField::AdCopy, "Headline: Wake up\nBody: Visit us")])).await.unwrap();
    wizards.advance(id).await.unwrap();

    wizards.update(id, patch(&[(DraftField::AdLanguage, "English, Marathi")])).await.unwrap();
    wizards.advance(id).await.unwrap();

    wizards
        .upload_image(
            id,
            ImageUploadPayload {
                purpose: ImageUploadPurpose::Creative,
                data_url: "data:image/png;base64,iVBORw0KGgo=".into(),
            },
        )
        .await
        .unwrap();
    wizards.advance(id).await.unwrap();

    wizards
        .upload_video(id, VideoUploadPayload { file_name: "teaser.mp4".into(), mime_type: "video/mp4".into() })
        .await
        .unwrap();
    let view = match wizards.advance(id).await.unwrap() {
        AdvanceResponse::Moved { wizard } => wizard,
        other => panic!("expected to move, got {:?}", other),
    };
    assert_eq!(view.step, WizardStep::AdBudget);
    assert!(view.is_last_step);

    wizards.update(id, patch(&[(DraftField::Budget, "250")])).await.unwrap();
    let receipt = match wizards.advance(id).await.unwrap() {
        AdvanceResponse::Committed { receipt } => receipt,
        other => panic!("expected a commit, got {:?}", other),
    };

    let campaigns = app.state.campaign_service.list();
    assert_eq!(campaigns.len(), 1);
    let campaign = &campaigns[0];
    assert_eq!(campaign.id, receipt.campaign.id);
    assert_eq!(campaign.status, CampaignStatus::Active);
    assert_eq!(campaign.budget, "250");
    assert!((5..=54).contains(&campaign.leads));

    let leads = app.state.crm_service.list(&LeadFilter::all());
    assert_eq!(leads.len() as u32, campaign.leads);
    for lead in &leads {
        assert_eq!(lead.campaign_id, campaign.id);
        assert!(!lead.name.is_empty());
        assert_eq!(lead.email, lead.email.to_lowercase());
        assert_eq!(lead.status, LeadStatus::New);
    }

    // O wizard terminou
    assert!(matches!(wizards.view(id).await, Err(AppError::WizardNotFound)));
}

#[tokio::test]
async fn advance_never_moves_on_invalid_budget() {
    let app = test_app();
    let wizards = &app.state.wizard_service;
    let id = wizards.open().await.id;

    let err = wizards.advance(id).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Please fill out all required fields in Business Details to improve AI accuracy. Competitors are optional."
    );
    let view = wizards.view(id).await.unwrap();
    assert_eq!(view.step_index, 0);
    assert!(view.message.is_some());

    wizards.retreat(id).await.unwrap();
    assert_eq!(wizards.view(id).await.unwrap().message, None);
    assert!(app.state.campaign_service.list().is_empty());
}

#[tokio::test]
async fn ad_copy_assist_requires_interests() {
    let app = test_app();
    let wizards = &app.state.wizard_service;
    let id = wizards.open().await.id;
    wizards
        .update(id, patch(&[(DraftField::ProductDescription, "Specialty coffee")]))
        .await
        .unwrap();

    let err = wizards.assist(id, AssistAction::AdCopy).await.unwrap_err();
    assert!(matches!(err, AppError::PrerequisiteMissing(_)));
    assert_eq!(app.generator.call_count(), 0);

    let view = wizards.view(id).await.unwrap();
    assert_eq!(view.draft.ad_copy, "");
    assert_eq!(
        view.message.as_deref(),
        Some("Please complete the Business Details and Target Audience steps first for better ad copy.")
    );
}

#[tokio::test]
async fn assist_writes_trimmed_output_and_keeps_draft_on_failure() {
    let app = test_app();
    let wizards = &app.state.wizard_service;
    let id = wizards.open().await.id;
    wizards
        .update(
            id,
            patch(&[
                (DraftField::ProductDescription, "Specialty coffee"),
                (DraftField::Interests, "coffee"),
            ]),
        )
        .await
        .unwrap();

    app.generator.push_text("\n  Headline: Fresh\nBody: Come taste it  \n");
    let response = wizards.assist(id, AssistAction::AdCopy).await.unwrap();
    assert!(response.applied);
    assert_eq!(response.wizard.draft.ad_copy, "Headline: Fresh\nBody: Come taste it");

    app.generator.push_text_failure("503");
    let err = wizards.assist(id, AssistAction::AdCopy).await.unwrap_err();
    assert!(matches!(err, AppError::GenerationFailed(_)));
    let view = wizards.view(id).await.unwrap();
    assert_eq!(view.draft.ad_copy, "Headline: Fresh\nBody: Come taste it");
}

#[tokio::test]
async fn manual_lead_lands_on_top_with_user_added_campaign() {
    let app = test_app();
    let lead = app
        .state
        .crm_service
        .add_manual_lead(AddLeadPayload {
            name: "Priya Shah".into(),
            email: "priya@shah.in".into(),
            phone: "+91 98 0000 0000".into(),
            campaign_id: Some(String::new()),
        })
        .unwrap();

    assert!(lead.id.starts_with("manual-"));
    assert_eq!(lead.campaign_id, "manual");
    assert_eq!(lead.campaign_name, "User Added");
    assert_eq!(lead.source, LeadSource::Manual);
    assert_eq!(lead.status, LeadStatus::New);
    assert!(lead.notes.is_empty() && lead.chat_history.is_empty() && lead.reminders.is_empty());

    let listed = app.state.crm_service.list(&LeadFilter::all());
    assert_eq!(listed[0].id, lead.id);
}

#[tokio::test]
async fn corrupt_lead_record_reads_as_empty() {
    let app = test_app();
    app.backend.set(keys::LEADS, "[{\"id\": broken").unwrap();

    assert!(app.state.crm_service.list(&LeadFilter::all()).is_empty());
    assert_eq!(app.state.dashboard_service.get_summary().upcoming_reminders.len(), 0);
}

#[tokio::test]
async fn filters_are_order_preserving_subsets() {
    let app = test_app();
    let crm = &app.state.crm_service;
    for name in ["Ana Lima", "Bia Costa", "Caio Reis"] {
        crm.add_manual_lead(AddLeadPayload {
            name: name.into(),
            email: "x@y.com".into(),
            phone: "1".into(),
            campaign_id: None,
        })
        .unwrap();
    }
    let all = crm.list(&LeadFilter::all());
    crm.change_status(&all[1].id, LeadStatus::Qualified).unwrap();

    let all = crm.list(&LeadFilter::all());
    assert!(all.windows(2).all(|w| w[0].date >= w[1].date));

    let qualified = crm.list(&LeadFilter { campaign: Some("all".into()), status: Some("Qualified".into()) });
    assert_eq!(qualified.len(), 1);
    assert_eq!(qualified[0].id, all[1].id);

    let none = crm.list(&LeadFilter { campaign: Some("1700000000000".into()), status: None });
    assert!(none.is_empty());
}
