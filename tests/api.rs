// tests/api.rs

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use adtargetz::app_router;
use common::test_app;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn dashboard_routes_require_a_session() {
    let app = app_router(test_app().state);

    let (status, body) = send(&app, Method::GET, "/api/leads", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Please log in to access the dashboard.");

    let (status, body) = send(&app, Method::GET, "/api/auth/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "anonymous");

    let (status, _) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn sentinel_credentials_and_logout() {
    let app = app_router(test_app().state);

    let (status, body) = send(&app, Method::POST, "/api/auth/login", Some(json!({"email": "error@test.com", "password": "x"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials provided.");

    let (status, body) = send(&app, Method::POST, "/api/auth/signup", Some(json!({"email": "exists@test.com", "password": "secret1"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "An account with this email already exists.");

    let (status, body) = send(&app, Method::POST, "/api/auth/signup", Some(json!({"email": "new@shop.com", "password": "12345"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Password must be at least 6 characters long.");

    let (status, body) = send(&app, Method::POST, "/api/auth/login", Some(json!({"email": "owner@shop.com", "password": "x"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "owner@shop.com");

    let (status, body) = send(&app, Method::GET, "/api/leads", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = send(&app, Method::POST, "/api/auth/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, "/api/campaigns", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn leads_api_validates_and_creates() {
    let app = app_router(test_app().state);
    send(&app, Method::POST, "/api/auth/login", Some(json!({"email": "owner@shop.com"}))).await;

    let (status, body) = send(&app, Method::POST, "/api/leads", Some(json!({"name": "", "email": "nope", "phone": "1"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["email"].is_array());

    let (status, lead) = send(&app, Method::POST, "/api/leads", Some(json!({"name": "Ana Lima", "email": "ana@lima.com", "phone": "+55 11 0000"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(lead["source"], "manual");
    assert_eq!(lead["campaignName"], "User Added");

    let uri = format!("/api/leads/{}/status", lead["id"].as_str().unwrap());
    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"status": "Contacted"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Contacted");

    let (status, _) = send(&app, Method::GET, "/api/leads/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let id = lead["id"].as_str().unwrap();
    let (status, body) = send(&app, Method::POST, &format!("/api/leads/{}/notes", id), Some(json!({"text": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["text"][0], "Note text is required.");

    let (status, _) = send(&app, Method::POST, &format!("/api/leads/{}/messages", id), Some(json!({"message": " \t "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, stored) = send(&app, Method::GET, &format!("/api/leads/{}", id), None).await;
    assert_eq!(stored["notes"], json!([]));
    assert_eq!(stored["chatHistory"], json!([]));
}

#[tokio::test]
async fn password_mismatch_is_reported_first() {
    let app = app_router(test_app().state);
    send(&app, Method::POST, "/api/auth/login", Some(json!({"email": "owner@shop.com"}))).await;

    let (status, body) = send(&app, Method::POST, "/api/settings/password", Some(json!({"current": "x", "new": "abc", "confirm": "abd"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "New passwords do not match.");

    let (status, _) = send(&app, Method::POST, "/api/settings/password", Some(json!({"current": "x", "new": "secret1", "confirm": "secret1"}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn wizard_assist_gate_returns_422() {
    let app = app_router(test_app().state);
    send(&app, Method::POST, "/api/auth/login", Some(json!({"email": "owner@shop.com"}))).await;

    let (status, wizard) = send(&app, Method::POST, "/api/wizards", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(wizard["stepName"], "Business Details");
    assert_eq!(wizard["draft"]["currency"], "INR");

    let id = wizard["id"].as_str().unwrap();
    let (status, body) = send(&app, Method::POST, &format!("/api/wizards/{}/assist/adCopy", id), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().starts_with("Please complete"));

    let (status, _) = send(&app, Method::POST, &format!("/api/wizards/{}/assist/teleport", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chatbot_is_public_and_never_errors() {
    let test = test_app();
    test.generator.push_text_failure("offline");
    let app = app_router(test.state);

    let (status, body) = send(&app, Method::POST, "/api/chatbot", Some(json!({"message": "Pricing?"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["text"].as_str().unwrap().starts_with("I'm having trouble"));

    let (status, _) = send(&app, Method::POST, "/api/chatbot", Some(json!({"message": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
