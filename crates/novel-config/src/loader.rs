use std::path::Path;

use secrecy::{ExposeSecret, SecretString};

use crate::{AnyOrArray, Config};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if
    /// [`Config::from_toml_str`] rejects its contents
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml_str(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// Expands `${VAR}` placeholders, deserializes, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_auth()?;
        self.validate_upstream()?;
        self.validate_server()?;
        Ok(())
    }

    /// Credential the upstream expects
    ///
    /// `upstream.api_key` when set, otherwise the inbound secret.
    pub fn upstream_api_key(&self) -> SecretString {
        let key = self.upstream.api_key.as_ref().unwrap_or(&self.auth.api_key);
        SecretString::from(key.expose_secret())
    }

    fn validate_auth(&self) -> anyhow::Result<()> {
        if self.auth.api_key.expose_secret().is_empty() {
            anyhow::bail!("auth.api_key must not be empty");
        }
        Ok(())
    }

    fn validate_upstream(&self) -> anyhow::Result<()> {
        let scheme = self.upstream.base_url.scheme();
        if scheme != "http" && scheme != "https" {
            anyhow::bail!("upstream.base_url must use http or https, got `{scheme}`");
        }

        if self.model.id.trim().is_empty() {
            anyhow::bail!("model.id must not be empty");
        }

        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        if self.server.stream_buffer == 0 {
            anyhow::bail!("server.stream_buffer must be greater than 0");
        }

        if self.server.health.enabled && !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with `/`");
        }

        if let Some(ref cors) = self.server.cors {
            if cors.credentials && cors.has_wildcard() {
                anyhow::bail!("server.cors.credentials cannot be combined with wildcard origins, methods or headers");
            }
            if let AnyOrArray::List(ref origins) = cors.origins {
                if origins.is_empty() {
                    anyhow::bail!("server.cors.origins must not be an empty list");
                }
            }
        }

        Ok(())
    }
}
