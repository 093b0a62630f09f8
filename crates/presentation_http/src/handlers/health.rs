//! Health check handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Server is running", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Which providers have credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProvidersStatus {
    pub text: bool,
    pub image: bool,
    pub audio: bool,
}

/// Provider readiness response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderHealthResponse {
    pub status: String,
    pub providers: ProvidersStatus,
}

/// Provider configuration check
///
/// Always `OK`: an unconfigured provider only means its modality falls back.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses((status = 200, description = "Provider configuration", body = ProviderHealthResponse))
)]
pub async fn provider_health(State(state): State<AppState>) -> Json<ProviderHealthResponse> {
    let status = state.orchestrator.provider_status();

    Json(ProviderHealthResponse {
        status: "OK".to_string(),
        providers: ProvidersStatus {
            text: status.text,
            image: status.image,
            audio: status.audio,
        },
    })
}
