//! Liveness and readiness endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Readiness report with the size of each in-memory store
#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    pub status: String,
    pub version: String,
    /// Concerts currently held in memory
    pub concerts: usize,
    /// Parolees currently held in memory
    pub parolees: usize,
    /// Whether the database-backed archive is mounted
    pub archive: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Process is up", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Stores are loaded and serving", body = ReadyResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadyResponse> {
    let services = &state.services;
    Json(ReadyResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        concerts: services.concerts.count(),
        parolees: services.parolees.count(),
        archive: services.archive.is_some(),
    })
}
