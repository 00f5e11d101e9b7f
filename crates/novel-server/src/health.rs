use axum::Json;
use axum::response::IntoResponse;
use http::StatusCode;
use serde_json::json;

/// Health check handler
///
/// Reports liveness of the proxy only; the upstream is not contacted.
pub(crate) async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
