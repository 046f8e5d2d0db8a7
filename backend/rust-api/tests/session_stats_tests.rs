use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use practice_tracker_api::config::Config;
use serde_json::json;
use tower::ServiceExt;

mod common;

use common::{create_problem, create_test_app, create_test_app_with, days_ago, send};

async fn log_session(app: &axum::Router, days: i64, solved: &[&str], minutes: u32) -> serde_json::Value {
    let (status, session) = send(
        app,
        "POST",
        "/api/sessions",
        Some(json!({
            "date": days_ago(days),
            "problemsSolved": solved,
            "timeSpent": minutes
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body {}", session);
    session
}

#[tokio::test]
async fn test_sessions_are_listed_newest_first() {
    let app = create_test_app();
    log_session(&app, 3, &["a"], 20).await;
    log_session(&app, 0, &[], 15).await;
    log_session(&app, 1, &["b"], 40).await;

    let (status, body) = send(&app, "GET", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::OK);

    let minutes: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["timeSpent"].as_u64().unwrap())
        .collect();
    assert_eq!(minutes, vec![15, 40, 20]);
}

#[tokio::test]
async fn test_session_date_defaults_to_now() {
    let app = create_test_app();
    let (status, session) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({ "timeSpent": 25, "notes": "warm-up" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(session["date"], "2024-03-15T12:00:00Z");
    assert_eq!(session["problemsSolved"], json!([]));
    assert_eq!(session["notes"], "warm-up");
}

#[tokio::test]
async fn test_session_over_one_day_is_rejected() {
    let app = create_test_app();
    let (status, _) = send(&app, "POST", "/api/sessions", Some(json!({ "timeSpent": 2000 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_session() {
    let app = create_test_app();
    let session = log_session(&app, 0, &[], 10).await;
    let uri = format!("/api/sessions/{}", session["id"].as_str().unwrap());

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/api/sessions", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_stats_on_empty_store() {
    let app = create_test_app();
    let (status, stats) = send(&app, "GET", "/api/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalProblems"], 0);
    assert_eq!(stats["currentStreak"], 0);
    assert_eq!(stats["averageTime"], 0.0);
    assert_eq!(stats["weeklyProgress"], json!([0, 0, 0, 0, 0, 0, 0]));
    assert_eq!(stats["recentActivity"], json!([]));
}

#[tokio::test]
async fn test_stats_reflect_problems_and_sessions() {
    let app = create_test_app();

    let solved = create_problem(
        &app,
        json!({ "title": "Two Sum", "difficulty": "Easy", "category": ["Arrays"] }),
    )
    .await;
    create_problem(
        &app,
        json!({ "title": "Word Ladder", "difficulty": "Hard", "category": ["Graphs"] }),
    )
    .await;
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/problems/{}/solutions", solved["id"].as_str().unwrap()),
        Some(json!({ "language": "Rust", "code": "fn main() {}" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    log_session(&app, 0, &["a", "b"], 30).await;
    log_session(&app, 1, &["c"], 60).await;
    log_session(&app, 3, &["d"], 45).await;

    let (_, stats) = send(&app, "GET", "/api/stats", None).await;

    assert_eq!(stats["totalProblems"], 2);
    assert_eq!(stats["solvedProblems"], 1);
    assert_eq!(stats["easyProblems"], 1);
    assert_eq!(stats["mediumProblems"], 0);
    assert_eq!(stats["hardProblems"], 1);
    assert_eq!(stats["currentStreak"], 2);
    assert_eq!(stats["longestStreak"], 2);
    assert_eq!(stats["weeklyProgress"], json!([0, 0, 0, 1, 0, 1, 2]));
    assert_eq!(stats["categoryProgress"], json!({ "Arrays": 1, "Graphs": 0 }));
    assert_eq!(stats["averageTime"], 45.0);
    assert_eq!(stats["recentActivity"].as_array().unwrap().len(), 3);
    assert_eq!(stats["recentActivity"][0]["timeSpent"], 30);
}

#[tokio::test]
async fn test_week_old_session_is_left_out_of_histogram() {
    let app = create_test_app();
    log_session(&app, 7, &["a"], 30).await;

    let (_, stats) = send(&app, "GET", "/api/stats", None).await;
    assert_eq!(stats["weeklyProgress"], json!([0, 0, 0, 0, 0, 0, 0]));
    assert_eq!(stats["recentActivity"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_health_reports_record_counts() {
    let app = create_test_app();
    create_problem(&app, json!({ "title": "Two Sum", "difficulty": "Easy" })).await;
    log_session(&app, 0, &[], 10).await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["records"]["problems"], 1);
    assert_eq!(body["records"]["sessions"], 1);
}

#[tokio::test]
async fn test_metrics_endpoint_follows_config() {
    let app = create_test_app();
    send(&app, "GET", "/api/stats", None).await;
    let (status, body) = send(&app, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("http_requests_total"));

    let disabled = create_test_app_with(Config {
        metrics_enabled: false,
        ..Config::default()
    });
    let (status, _) = send(&disabled, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_trace_id_is_echoed_or_generated() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-trace-id", "trace-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-trace-id"], "trace-123");

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-trace-id"));
}
