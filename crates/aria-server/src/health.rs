use axum::Json;
use axum::response::IntoResponse;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "aria";

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
    }))
}
