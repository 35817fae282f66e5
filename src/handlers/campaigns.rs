// src/handlers/campaigns.rs

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{common::error::AppError, config::AppState, models::campaign::Campaign};

// GET /api/campaigns
pub async fn list_campaigns(State(app_state): State<AppState>) -> Json<Vec<Campaign>> {
    Json(app_state.campaign_service.list())
}

// GET /api/campaigns/{id}
pub async fn get_campaign(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Campaign>, AppError> {
    Ok(Json(app_state.campaign_service.get(&id)?))
}

// DELETE /api/campaigns/{id}
// Os leads da campanha ficam no CRM.
pub async fn delete_campaign(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Campaign>, AppError> {
    Ok(Json(app_state.campaign_service.delete(&id)?))
}
