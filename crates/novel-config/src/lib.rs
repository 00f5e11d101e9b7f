//! Configuration for novel-proxy
//!
//! Loaded once at startup from a TOML file and handed to the server and the
//! upstream client by value.

#![allow(clippy::must_use_candidate)]

pub mod auth;
pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod model;
pub mod server;
pub mod telemetry;
pub mod upstream;

use serde::Deserialize;

pub use auth::AuthConfig;
pub use cors::{AnyOrArray, CorsConfig};
pub use health::HealthConfig;
pub use model::ModelConfig;
pub use server::{DEFAULT_LISTEN_ADDRESS, RequestLogConfig, ServerConfig};
pub use telemetry::{LogFormat, TelemetryConfig};
pub use upstream::{DEFAULT_BASE_URL, DEFAULT_REPETITION_PENALTY, UpstreamConfig};

/// Top-level configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Inbound credential
    pub auth: AuthConfig,
    /// Upstream provider settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Advertised model
    #[serde(default)]
    pub model: ModelConfig,
    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
