use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Base URL of the NovelGPT extension API
pub const DEFAULT_BASE_URL: &str = "https://www.gpt4novel.com/api/xiaoshuoai/ext/v1";

/// Repetition penalty sent when the caller does not supply one
pub const DEFAULT_REPETITION_PENALTY: f64 = 1.05;

/// Upstream provider connection settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base URL; `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Credential presented to the upstream
    ///
    /// Falls back to `auth.api_key` when absent.
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Default `repetition_penalty`
    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: f64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            repetition_penalty: DEFAULT_REPETITION_PENALTY,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("valid default URL")
}

const fn default_repetition_penalty() -> f64 {
    DEFAULT_REPETITION_PENALTY
}
