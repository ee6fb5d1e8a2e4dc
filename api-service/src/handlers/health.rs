//! Liveness handlers

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

/// Root liveness message
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Voyage Analytics ML API is running" }))
}

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
