//! GET /api/test: liveness check.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    /// RFC 3339, UTC, millisecond precision
    pub time: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Server running successfully".to_string(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
