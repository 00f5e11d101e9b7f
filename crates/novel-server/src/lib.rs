//! OpenAI-compatible HTTP front end for novel-proxy
//!
//! Exposes `/v1/chat/completions` and `/v1/models` behind a shared-secret
//! bearer check and forwards completions to an [`Upstream`].

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod auth;
mod chat;
mod cors;
mod error;
mod health;
mod models;
pub mod protocol;
mod request_log;
mod state;
mod stream;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use novel_config::Config;
use novel_upstream::{Upstream, UpstreamClient};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use error::ServerError;

use crate::state::AppState;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration, talking to the configured upstream
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream HTTP client cannot be constructed
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let upstream = UpstreamClient::new(&config.upstream, config.upstream_api_key())?;
        Ok(Self::with_upstream(config, Arc::new(upstream)))
    }

    /// Build the server around an arbitrary [`Upstream`] implementation
    pub fn with_upstream(config: &Config, upstream: Arc<dyn Upstream>) -> Self {
        let state = AppState::new(config, upstream);
        let api_key = Arc::new(config.auth.api_key.clone());

        let mut app = Router::new()
            .route("/v1/chat/completions", post(chat::chat_completions))
            .route("/v1/models", get(models::list_models))
            .route("/v1/models/{id}", get(models::retrieve_model))
            .route_layer(middleware::from_fn_with_state(api_key, auth::require_api_key))
            .with_state(state);

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        // Unmatched paths and methods get the same envelope as handler errors
        app = app
            .fallback(error::unknown_route)
            .method_not_allowed_fallback(error::method_not_allowed);

        // Apply middleware layers (innermost first)

        // Panics become 500 envelopes
        app = app.layer(CatchPanicLayer::custom(error::panic_response));

        if config.server.request_log.enabled {
            app = app.layer(middleware::from_fn_with_state(
                config.server.request_log.clone(),
                request_log::log_request,
            ));
        }

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Self {
            router: app,
            listen_address: config.server.listen_address(),
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
