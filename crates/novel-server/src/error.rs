use std::any::Any;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use http::header::{HeaderValue, WWW_AUTHENTICATE};
use http::{Method, StatusCode, Uri};
use novel_core::HttpError;
use novel_upstream::UpstreamError;
use thiserror::Error;

/// Errors surfaced to API consumers
#[derive(Debug, Error)]
pub enum ServerError {
    /// Missing or mismatched bearer credential
    #[error("Invalid API key")]
    Unauthorized,

    #[error("The model '{0}' does not exist")]
    ModelNotFound(String),

    /// No route matches the request path
    #[error("Unknown request URL: {method} {path}")]
    UnknownRoute { method: Method, path: String },

    /// The path exists but not for this method
    #[error("Method {method} is not allowed for {path}")]
    MethodNotAllowed { method: Method, path: String },

    /// Request body decoded but is semantically invalid
    #[error("{0}")]
    BadRequest(String),

    /// Request body could not be decoded
    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Unexpected failure inside the proxy, including handler panics
    #[error("{0}")]
    Internal(String),
}

impl HttpError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::ModelNotFound(_) | Self::UnknownRoute { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidBody(rejection) => rejection.status(),
            Self::Upstream(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Unauthorized
            | Self::ModelNotFound(_)
            | Self::UnknownRoute { .. }
            | Self::MethodNotAllowed { .. }
            | Self::BadRequest(_)
            | Self::InvalidBody(_) => "invalid_request_error",
            Self::Upstream(_) | Self::Internal(_) => "server_error",
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Self::Unauthorized => "invalid_api_key",
            Self::ModelNotFound(_) => "model_not_found",
            Self::UnknownRoute { .. } => "unknown_url",
            Self::MethodNotAllowed { .. } => "method_not_allowed",
            Self::BadRequest(_) | Self::InvalidBody(_) => "invalid_request",
            Self::Upstream(_) | Self::Internal(_) => "internal_server_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InvalidBody(rejection) => rejection.body_text(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let mut response = (status, Json(self.envelope())).into_response();
        if matches!(self, Self::Unauthorized) {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

/// Fallback for requests no route matches
pub(crate) async fn unknown_route(method: Method, uri: Uri) -> ServerError {
    ServerError::UnknownRoute {
        method,
        path: uri.path().to_owned(),
    }
}

/// Fallback for a known path requested with an unsupported method
pub(crate) async fn method_not_allowed(method: Method, uri: Uri) -> ServerError {
    ServerError::MethodNotAllowed {
        method,
        path: uri.path().to_owned(),
    }
}

/// Render a caught handler panic as an error envelope
pub(crate) fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    ServerError::Internal(panic_message(&*panic)).into_response()
}

/// Text carried by a panic payload
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else {
        "handler panicked".to_owned()
    }
}
