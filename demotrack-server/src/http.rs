//! Demotrack HTTP REST API
//!
//! Axum server that computes analytics snapshots over session and user
//! collections posted by the dashboard. It keeps no data between requests.
//!
//! Each endpoint has a thin axum handler that delegates to an inner function;
//! the inner functions are tested directly without axum dispatch.
//!
//! Endpoints:
//! - GET  /health             liveness
//! - GET  /version            server version info
//! - POST /analytics/snapshot compute a snapshot

use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use demotrack_core::{Aggregator, DemotrackConfig};
use demotrack_ingest::{Collection, RawSession, RawUser};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::subsystems::snapshot;

/// Shared state for all HTTP handlers
#[derive(Clone, Debug)]
pub struct HttpState {
    pub config: DemotrackConfig,
    pub aggregator: Aggregator,
}

impl HttpState {
    pub fn new(config: DemotrackConfig) -> Self {
        let aggregator = Aggregator::new(config.analytics.clone());
        Self { config, aggregator }
    }
}

/// Build the Axum router with all endpoints
pub fn build_router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        .route("/analytics/snapshot", post(snapshot_handler))
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    config: DemotrackConfig,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = format!("{}:{}", config.http.host, config.http.port);
    let state = Arc::new(HttpState::new(config));

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Demotrack HTTP API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

#[derive(Debug, Deserialize, Default)]
pub struct SnapshotRequest {
    #[serde(default)]
    pub sessions: Collection<RawSession>,
    #[serde(default)]
    pub users: Collection<RawUser>,
    /// Pins "now" for the computation; server time when absent.
    pub now: Option<DateTime<Utc>>,
}

/// Standard HTTP error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            status: "error".to_string(),
        }
    }
}

// ============================================================================
// Inner (directly testable) functions
// ============================================================================

pub fn health_inner() -> (StatusCode, serde_json::Value) {
    (
        StatusCode::OK,
        serde_json::json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
        }),
    )
}

pub fn version_inner() -> serde_json::Value {
    serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "protocol": "demotrack/1",
    })
}

/// Resolve the posted collections and compute a snapshot. Malformed records
/// are the caller's problem and come back as 400.
pub fn snapshot_inner(state: &HttpState, req: SnapshotRequest) -> (StatusCode, serde_json::Value) {
    let result = snapshot::build_snapshot(&state.aggregator, req.sessions, req.users, req.now);

    match result {
        Ok(snapshot) => match serde_json::to_value(&snapshot) {
            Ok(body) => (StatusCode::OK, body),
            Err(e) => {
                tracing::error!("Failed to serialize snapshot: {}", e);
                error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        },
        Err(e) => {
            tracing::warn!("Rejected snapshot request: {}", e);
            error_body(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

// ============================================================================
// Axum handlers
// ============================================================================

pub async fn health_handler() -> impl IntoResponse {
    let (status, body) = health_inner();
    (status, Json(body))
}

pub async fn version_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(version_inner()))
}

pub async fn snapshot_handler(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<SnapshotRequest>,
) -> impl IntoResponse {
    let (status, body) = snapshot_inner(&state, req);
    (status, Json(body))
}

// ============================================================================
// Helpers
// ============================================================================

fn error_body(status: StatusCode, msg: impl Into<String>) -> (StatusCode, serde_json::Value) {
    let body = serde_json::to_value(ErrorResponse::new(msg))
        .unwrap_or_else(|_| serde_json::json!({ "status": "error" }));
    (status, body)
}

// ============================================================================
// Unit tests against the inner functions
// ============================================================================
