#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use practice_tracker_api::{
    config::Config, create_router, services::AppState, store::InMemoryStore, utils::time::Clock,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Frozen "now" shared by every integration test.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

pub fn create_test_app() -> Router {
    create_test_app_with(Config::default())
}

pub fn create_test_app_with(config: Config) -> Router {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let app_state = Arc::new(AppState::with_store(
        config,
        Arc::new(InMemoryStore::new()),
        Clock::fixed(now()),
    ));

    create_router(app_state)
}

/// Sends a request and decodes the JSON body. Empty bodies come back as
/// `Value::Null`, non-JSON ones as a string.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, json)
}

pub async fn create_problem(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, "POST", "/api/problems", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body {}", json);
    json
}
