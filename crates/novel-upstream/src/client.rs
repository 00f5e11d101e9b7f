//! HTTP client for the upstream chat completion endpoint

use async_trait::async_trait;
use novel_config::UpstreamConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::UpstreamError;
use crate::sse::{self, EventStream};
use crate::types::{CompletionRequest, CompletionResponse};

/// Seam between the HTTP handlers and the upstream provider
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Send a non-streaming completion request
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, UpstreamError>;

    /// Send a streaming completion request
    ///
    /// Resolves once the upstream has accepted the request; the returned
    /// stream then yields chunks as they arrive.
    async fn complete_stream(&self, request: CompletionRequest) -> Result<EventStream, UpstreamError>;
}

/// Client for the NovelGPT chat completion API
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
    api_key: SecretString,
    repetition_penalty: f64,
}

impl UpstreamClient {
    /// Create a client from upstream configuration and the credential to present
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &UpstreamConfig, api_key: SecretString) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .user_agent(concat!("novel-proxy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
            repetition_penalty: config.repetition_penalty,
        })
    }

    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }

    async fn send(&self, mut request: CompletionRequest, stream: bool) -> Result<reqwest::Response, UpstreamError> {
        request.stream = Some(stream);
        request.params.repetition_penalty.get_or_insert(self.repetition_penalty);

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            stream,
            "sending upstream request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "upstream request failed");
                UpstreamError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "upstream returned error");
            return Err(UpstreamError::Status { status, body });
        }

        Ok(response)
    }
}

#[async_trait]
impl Upstream for UpstreamClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, UpstreamError> {
        let response = self.send(request, false).await?;
        let body = response.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }

    async fn complete_stream(&self, request: CompletionRequest) -> Result<EventStream, UpstreamError> {
        let response = self.send(request, true).await?;
        Ok(sse::from_response(response))
    }
}
