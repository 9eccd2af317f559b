//! Health check endpoint.

use axum::Json;
use serde::Serialize;

use crate::config::{APP_VERSION, SYSTEM_ID};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub system: &'static str,
    pub version: &'static str,
}

/// `GET /api/health`: liveness check for the dashboard.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        system: SYSTEM_ID,
        version: APP_VERSION,
    })
}
