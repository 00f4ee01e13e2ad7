//! Health check handlers

use axum::Json;
use serde::Serialize;

use crate::models::ApiHealthResponse;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
}

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

/// `/api/health`, kept for clients of the prediction API
pub async fn api_check() -> Json<ApiHealthResponse> {
    Json(ApiHealthResponse {
        status: "ok",
        message: "API is running",
    })
}
