// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    config::AppState,
    models::dashboard::{AnalyticsReport, DashboardSummary},
};

// GET /api/dashboard/summary
pub async fn get_summary(State(app_state): State<AppState>) -> Json<DashboardSummary> {
    Json(app_state.dashboard_service.get_summary())
}

// GET /api/dashboard/analytics
pub async fn get_analytics(State(app_state): State<AppState>) -> Json<AnalyticsReport> {
    Json(app_state.dashboard_service.get_analytics())
}
