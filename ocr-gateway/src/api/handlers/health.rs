use axum::Json;
use serde::Serialize;

/// Static liveness payload. Serializes to exactly `{"status":"ok"}`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    pub status: &'static str,
}

/// `GET /health`
///
/// Touches nothing else, so it stays green regardless of engine state.
pub async fn health_check() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}
