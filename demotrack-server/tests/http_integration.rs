//! HTTP integration tests for the Demotrack REST API
//!
//! Requests go through the full Axum router via `oneshot`, so routing, JSON
//! extraction and status mapping are all exercised.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use demotrack_core::DemotrackConfig;
use demotrack_server::http::{build_router, HttpState};
use serde_json::json;
use tower::ServiceExt;

fn make_state() -> Arc<HttpState> {
    Arc::new(HttpState::new(DemotrackConfig::default()))
}

async fn send(req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let app = build_router(make_state());
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

fn post_snapshot(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analytics/snapshot")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ===========================================================================
// TEST 1: GET /health
// ===========================================================================
#[tokio::test]
async fn test_health_endpoint() {
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

// ===========================================================================
// TEST 2: GET /version
// ===========================================================================
#[tokio::test]
async fn test_version_endpoint() {
    let req = Request::builder()
        .method("GET")
        .uri("/version")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["protocol"], "demotrack/1");
}

// ===========================================================================
// TEST 3: POST /analytics/snapshot: full scenario over both envelope shapes
// ===========================================================================
#[tokio::test]
async fn test_snapshot_endpoint_computes_metrics() {
    let body = json!({
        "sessions": {
            "data": [
                {"id": 1, "date": "2024-06-10", "time": "10:00", "status": "completed", "rating": 5, "duration": 90, "technology": "Rust", "createdBy": 10},
                {"id": 2, "date": "2024-06-10", "time": "12:00", "status": "cancelled", "technology": "Go"},
                {"id": 3, "date": "2024-06-12", "time": "09:15", "status": "upcoming", "technology": "Elixir", "createdBy": "Guest Host"}
            ],
            "total": 3,
            "page": 1,
            "limit": 50
        },
        "users": [
            {"id": 10, "name": "Dana Scully", "role": "Senior Admin", "status": "inactive", "joinDate": "2024-03-14"},
            {"id": 11, "name": "Fox Mulder", "role": "employee", "status": "active", "joinDate": "2024-03-20"}
        ],
        "now": "2024-06-20T12:00:00Z"
    });

    let (status, snapshot) = send(post_snapshot(body)).await;
    assert_eq!(status, StatusCode::OK, "body: {}", snapshot);

    assert_eq!(snapshot["totalSessions"], 3);
    assert_eq!(snapshot["activeUsers"], 1);
    // (90 + 60 + 60) / 3 = 70
    assert_eq!(snapshot["averageSessionTime"], "1h 10m");
    // 1 of 3
    assert_eq!(snapshot["conversionRate"], 33.3);

    let trends = snapshot["performanceTrends"].as_array().unwrap();
    assert_eq!(trends.len(), 7);
    assert_eq!(trends[0]["date"], "2024-06-10");
    assert_eq!(trends[0]["name"], "Mon");
    assert_eq!(trends[0]["activeSessions"], 1);
    assert_eq!(trends[0]["cancelledSessions"], 1);
    assert_eq!(trends[2]["activeSessions"], 1);

    let march = &snapshot["userEngagement"][2];
    assert_eq!(march["admins"], 1);
    assert_eq!(march["employees"], 1);
    assert_eq!(march["inactive"], 1);

    let activity = snapshot["recentActivity"].as_array().unwrap();
    assert_eq!(activity.len(), 3);
    assert_eq!(activity[0]["action"], "Scheduled Elixir Demo");
    assert_eq!(activity[0]["user"], "Guest Host");
    assert_eq!(activity[0]["time"], "8 days ago");
    assert_eq!(activity[1]["action"], "Cancelled Go Demo");
    assert_eq!(activity[1]["user"], "Unknown User");
    assert_eq!(activity[2]["user"], "Dana Scully");
}

// ===========================================================================
// TEST 4: POST /analytics/snapshot: unparseable session date is a 400
// ===========================================================================
#[tokio::test]
async fn test_snapshot_endpoint_rejects_bad_dates() {
    let body = json!({
        "sessions": [{"id": "bad", "date": "31/12/2024", "status": "upcoming"}],
        "users": []
    });

    let (status, err) = send(post_snapshot(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["status"], "error");
}

// ===========================================================================
// TEST 5: POST /analytics/snapshot: date at the end of the calendar is a 400
// ===========================================================================
#[tokio::test]
async fn test_snapshot_endpoint_rejects_out_of_range_date() {
    let body = json!({
        "sessions": [{"id": 1, "date": "+262142-12-30", "time": "10:00", "status": "completed"}],
        "users": [],
        "now": "2024-06-20T12:00:00Z"
    });

    let (status, err) = send(post_snapshot(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["status"], "error");
    assert!(err["error"].as_str().unwrap().contains("+262142-12-30"));
}

// ===========================================================================
// TEST 6: POST /analytics/snapshot: null text fields are accepted
// ===========================================================================
#[tokio::test]
async fn test_snapshot_endpoint_accepts_null_text_fields() {
    let body = json!({
        "sessions": [{"id": 1, "date": "2024-06-10", "time": null, "status": "completed", "technology": null}],
        "users": [{"id": 2, "name": "Fox Mulder", "role": null, "status": "active", "joinDate": "2024-01-02"}],
        "now": "2024-06-20T12:00:00Z"
    });

    let (status, snapshot) = send(post_snapshot(body)).await;
    assert_eq!(status, StatusCode::OK, "body: {}", snapshot);
    assert_eq!(snapshot["totalSessions"], 1);
    assert_eq!(snapshot["activeUsers"], 1);
    assert_eq!(snapshot["recentActivity"][0]["action"], "Completed  Demo");
}

// ===========================================================================
// TEST 7: POST /analytics/snapshot: malformed JSON never reaches the engine
// ===========================================================================
#[tokio::test]
async fn test_snapshot_endpoint_rejects_malformed_json() {
    let req = Request::builder()
        .method("POST")
        .uri("/analytics/snapshot")
        .header("content-type", "application/json")
        .body(Body::from("{\"sessions\": "))
        .unwrap();

    let (status, _) = send(req).await;
    assert!(status.is_client_error(), "Unexpected status: {}", status);
}

// ===========================================================================
// TEST 8: identical requests give identical snapshots
// ===========================================================================
#[tokio::test]
async fn test_snapshot_endpoint_is_idempotent() {
    let body = json!({
        "sessions": [{"id": 1, "date": "2024-06-10", "time": "10:00", "status": "completed", "rating": 4}],
        "users": [],
        "now": "2024-06-11T00:00:00Z"
    });

    let (_, first) = send(post_snapshot(body.clone())).await;
    let (_, second) = send(post_snapshot(body)).await;
    assert_eq!(first, second);
}
