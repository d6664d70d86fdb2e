//! Local health check.

use axum::response::IntoResponse;
use axum::Json;

/// `GET /health`: always 200, no auth, no upstream involvement.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
