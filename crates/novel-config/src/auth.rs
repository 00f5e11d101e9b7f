use secrecy::SecretString;
use serde::Deserialize;

/// Inbound authentication
///
/// Every `/v1` route requires `Authorization: Bearer <api_key>`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Shared secret clients must present
    pub api_key: SecretString,
}
