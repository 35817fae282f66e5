// src/routes.rs

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};

use crate::{config::AppState, handlers, middleware::auth::session_guard};

// Imagem de até 4 MiB chega como data URL em base64 (~5,4 MiB)
const UPLOAD_BODY_LIMIT: usize = 8 * 1024 * 1024;

pub fn app_router(app_state: AppState) -> Router {
    // Rotas públicas
    let auth_routes = Router::new()
        .route("/session", get(handlers::auth::get_session))
        .route("/login", post(handlers::auth::login))
        .route("/signup", post(handlers::auth::signup))
        .route("/logout", post(handlers::auth::logout));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/analytics", get(handlers::dashboard::get_analytics));

    let campaign_routes = Router::new()
        .route("/", get(handlers::campaigns::list_campaigns))
        .route(
            "/{id}",
            get(handlers::campaigns::get_campaign).delete(handlers::campaigns::delete_campaign),
        );

    let wizard_routes = Router::new()
        .route("/", post(handlers::wizard::open_wizard))
        .route("/catalog", get(handlers::wizard::get_catalog))
        .route(
            "/{id}",
            get(handlers::wizard::get_wizard).delete(handlers::wizard::discard_wizard),
        )
        .route("/{id}/draft", patch(handlers::wizard::update_draft))
        .route("/{id}/advance", post(handlers::wizard::advance))
        .route("/{id}/retreat", post(handlers::wizard::retreat))
        .route("/{id}/assist/{action}", post(handlers::wizard::assist))
        .route("/{id}/uploads/image", post(handlers::wizard::upload_image))
        .route("/{id}/uploads/video", post(handlers::wizard::upload_video))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT));

    let lead_routes = Router::new()
        .route("/", get(handlers::crm::list_leads).post(handlers::crm::add_lead))
        .route("/{id}", get(handlers::crm::get_lead))
        .route("/{id}/status", put(handlers::crm::change_status))
        .route("/{id}/notes", post(handlers::crm::add_note))
        .route("/{id}/reminders", post(handlers::crm::add_reminder))
        .route("/{id}/reminders/{rid}/toggle", post(handlers::crm::toggle_reminder))
        .route("/{id}/messages", post(handlers::crm::send_message))
        .route("/{id}/messages/brochure", post(handlers::crm::send_brochure))
        .route("/{id}/messages/welcome", post(handlers::crm::send_welcome));

    let settings_routes = Router::new()
        .route(
            "/profile",
            get(handlers::settings::get_profile).put(handlers::settings::update_profile),
        )
        .route(
            "/notifications",
            get(handlers::settings::get_notifications).put(handlers::settings::update_notifications),
        )
        .route("/password", post(handlers::settings::change_password));

    let integration_routes = Router::new()
        .route("/", get(handlers::settings::list_integrations))
        .route("/{id}/toggle", post(handlers::settings::toggle_integration));

    // Tudo que fica atrás do login
    let dashboard_area = Router::new()
        .nest("/dashboard", dashboard_routes)
        .nest("/campaigns", campaign_routes)
        .nest("/wizards", wizard_routes)
        .nest("/leads", lead_routes)
        .nest("/settings", settings_routes)
        .nest("/integrations", integration_routes)
        .route("/linkedin/post", post(handlers::assistant::linkedin_post))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            session_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/chatbot", post(handlers::assistant::chatbot))
        .nest("/api/auth", auth_routes)
        .nest("/api", dashboard_area)
        .with_state(app_state)
}
