use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Trait for domain errors that can be rendered as an HTTP error response
///
/// The server layer turns implementors into a status line plus an
/// [`ErrorEnvelope`] body, so feature crates never depend on axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Error category, e.g. `invalid_request_error` or `server_error`
    fn error_type(&self) -> &str;

    /// Machine-readable code, e.g. `invalid_api_key`
    fn error_code(&self) -> &str;

    /// Message exposed to API consumers
    fn client_message(&self) -> String {
        self.to_string()
    }

    /// Build the wire envelope for this error
    fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::new(self.client_message(), self.error_type(), self.error_code())
    }
}

/// Uniform JSON body returned for every failure
///
/// Also sent in-band as the last frame of a stream that fails after the
/// response headers went out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error details
    pub error: ErrorDetail,
}

/// Body of an [`ErrorEnvelope`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable message
    pub message: String,
    /// Error category
    #[serde(rename = "type")]
    pub error_type: String,
    /// Machine-readable code
    pub code: String,
}

impl ErrorEnvelope {
    /// Create an envelope from its three fields
    pub fn new(message: impl Into<String>, error_type: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                error_type: error_type.into(),
                code: code.into(),
            },
        }
    }
}
