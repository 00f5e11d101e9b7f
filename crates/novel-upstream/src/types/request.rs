use serde::{Deserialize, Serialize};

use super::message::ChatMessage;

/// A chat completion request
///
/// Decoded from the inbound OpenAI-shaped body and re-encoded as the upstream
/// request body. Sampling values are passed through without validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation, oldest message first
    pub messages: Vec<ChatMessage>,
    /// Sampling parameters
    #[serde(flatten)]
    pub params: CompletionParams,
    /// Whether the caller wants a streamed response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl CompletionRequest {
    /// Create a non-streaming request with default sampling parameters
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            params: CompletionParams::default(),
            stream: None,
        }
    }

    /// Whether a streamed response was requested
    pub fn is_stream(&self) -> bool {
        self.stream.unwrap_or(false)
    }
}

/// Sampling parameters of a [`CompletionRequest`]
///
/// `temperature`, `top_p` and `max_tokens` fall back to the proxy's
/// defaults when omitted. The OpenAI-only knobs are accepted inbound but
/// never sent upstream. `repetition_penalty` is not read from inbound
/// bodies; the client sends its configured default unless the caller set
/// one on the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionParams {
    #[serde(default = "default_temperature", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default = "default_top_p", skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default = "default_max_tokens", skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing)]
    pub presence_penalty: Option<f64>,
    #[serde(default, skip_serializing)]
    pub frequency_penalty: Option<f64>,
    /// Upstream-specific
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub repetition_penalty: Option<f64>,
    /// Number of choices to generate
    #[serde(default, skip_serializing)]
    pub n: Option<u32>,
    /// End-user tag
    #[serde(default, skip_serializing)]
    pub user: Option<String>,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
            presence_penalty: None,
            frequency_penalty: None,
            repetition_penalty: None,
            n: None,
            user: None,
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
const fn default_temperature() -> Option<f64> {
    Some(0.7)
}

#[allow(clippy::unnecessary_wraps)]
const fn default_top_p() -> Option<f64> {
    Some(0.35)
}

#[allow(clippy::unnecessary_wraps)]
const fn default_max_tokens() -> Option<u32> {
    Some(800)
}
