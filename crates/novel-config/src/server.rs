use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::Deserialize;

use crate::{cors::CorsConfig, health::HealthConfig};

/// Listen address used when none is configured
pub const DEFAULT_LISTEN_ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8000);

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Frames buffered between the upstream reader and a streaming response
    #[serde(default = "default_stream_buffer")]
    pub stream_buffer: usize,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub cors: Option<CorsConfig>,
    #[serde(default)]
    pub request_log: RequestLogConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            stream_buffer: default_stream_buffer(),
            health: HealthConfig::default(),
            cors: None,
            request_log: RequestLogConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Configured listen address or [`DEFAULT_LISTEN_ADDRESS`]
    pub fn listen_address(&self) -> SocketAddr {
        self.listen_address.unwrap_or(DEFAULT_LISTEN_ADDRESS)
    }
}

/// Debug logging of inbound requests
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestLogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Also log request bodies
    #[serde(default)]
    pub bodies: bool,
    /// Bodies larger than this are not buffered or logged
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for RequestLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bodies: false,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

const fn default_stream_buffer() -> usize {
    16
}

const fn default_true() -> bool {
    true
}

const fn default_max_body_bytes() -> usize {
    64 * 1024
}
