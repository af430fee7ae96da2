//! Health check endpoints

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use super::ApiState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness response
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub assistant: String,
    pub checks: ReadinessChecks,
}

/// Individual collaborator checks
#[derive(Serialize)]
pub struct ReadinessChecks {
    pub stt: CheckResult,
    pub tts: CheckResult,
}

/// Result of a single check
#[derive(Serialize)]
pub struct CheckResult {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckResult {
    const fn ok() -> Self {
        Self {
            status: "ok",
            message: None,
        }
    }

    fn unavailable() -> Self {
        Self {
            status: "unavailable",
            message: Some("not configured".to_string()),
        }
    }

    fn from_configured(configured: bool) -> Self {
        if configured { Self::ok() } else { Self::unavailable() }
    }
}

/// Liveness probe - is the service running?
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness probe; text conversation works without the optional voice collaborators
async fn ready(State(state): State<Arc<ApiState>>) -> Json<ReadinessResponse> {
    Json(ReadinessResponse {
        status: "ok",
        assistant: state.assistant.persona_name().to_string(),
        checks: ReadinessChecks {
            stt: CheckResult::from_configured(state.transcriber.is_some()),
            tts: CheckResult::from_configured(state.synthesizer.is_some()),
        },
    })
}

/// Build liveness router
pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

/// Build readiness router
pub fn ready_router(state: Arc<ApiState>) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
