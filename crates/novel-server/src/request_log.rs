use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::HeaderMap;
use http::header::{AUTHORIZATION, CONTENT_LENGTH};
use novel_config::RequestLogConfig;

use crate::error::ServerError;

const REDACTED: &str = "[redacted]";

/// Log every inbound request at debug level
///
/// Headers are logged with the credential redacted. Bodies are logged only
/// when enabled and when the declared length fits the configured limit.
pub(crate) async fn log_request(State(config): State<RequestLogConfig>, request: Request, next: Next) -> Response {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return next.run(request).await;
    }

    tracing::debug!(
        method = %request.method(),
        uri = %request.uri(),
        headers = ?redacted_headers(request.headers()),
        "incoming request"
    );

    if !config.bodies {
        return next.run(request).await;
    }

    match declared_length(request.headers()) {
        Some(0) => next.run(request).await,
        Some(length) if length <= config.max_body_bytes => {
            let (parts, body) = request.into_parts();
            let bytes = match to_bytes(body, config.max_body_bytes).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    return ServerError::BadRequest(format!("failed to read request body: {e}")).into_response();
                }
            };

            tracing::debug!(body = %String::from_utf8_lossy(&bytes), "request body");
            next.run(Request::from_parts(parts, Body::from(bytes))).await
        }
        _ => {
            tracing::debug!(limit = config.max_body_bytes, "request body not logged");
            next.run(request).await
        }
    }
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers.get(CONTENT_LENGTH)?.to_str().ok()?.parse().ok()
}

fn redacted_headers(headers: &HeaderMap) -> Vec<(&str, &str)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if name == AUTHORIZATION {
                REDACTED
            } else {
                value.to_str().unwrap_or("<non-utf8>")
            };
            (name.as_str(), value)
        })
        .collect()
}
