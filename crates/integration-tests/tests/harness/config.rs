//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use novel_config::{
    AuthConfig, Config, CorsConfig, HealthConfig, ModelConfig, ServerConfig, TelemetryConfig, UpstreamConfig,
};
use secrecy::SecretString;

/// Secret clients present to the proxy
pub const API_KEY: &str = "sk-test-inbound";

/// Secret the proxy presents to the upstream
pub const UPSTREAM_KEY: &str = "sk-test-upstream";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder pointed at the given upstream base URL
    pub fn new(upstream_base_url: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                auth: AuthConfig {
                    api_key: SecretString::from(API_KEY),
                },
                upstream: UpstreamConfig {
                    base_url: upstream_base_url.parse().expect("valid URL"),
                    api_key: Some(SecretString::from(UPSTREAM_KEY)),
                    ..UpstreamConfig::default()
                },
                model: ModelConfig::default(),
                telemetry: TelemetryConfig::default(),
            },
        }
    }

    /// Reuse the inbound secret towards the upstream
    pub fn without_upstream_key(mut self) -> Self {
        self.config.upstream.api_key = None;
        self
    }

    /// Set the default repetition penalty sent upstream
    pub fn with_repetition_penalty(mut self, penalty: f64) -> Self {
        self.config.upstream.repetition_penalty = penalty;
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Serve the health check on a different path
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Log request bodies
    pub fn with_request_bodies(mut self) -> Self {
        self.config.server.request_log.bodies = true;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
