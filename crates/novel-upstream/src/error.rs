use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the upstream provider
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-success status
    #[error("upstream returned {status}: {body}")]
    Status {
        /// Status line received
        status: StatusCode,
        /// Raw response body
        body: String,
    },

    /// The request could not be sent or the body could not be read
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body or stream payload was not valid JSON
    #[error("invalid upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading the streamed body failed part way through
    #[error("upstream stream interrupted: {0}")]
    Stream(String),
}

impl UpstreamError {
    /// Status reported by the upstream, if it answered at all
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
