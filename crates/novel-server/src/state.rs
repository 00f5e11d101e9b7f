use std::sync::Arc;

use novel_config::Config;
use novel_upstream::Upstream;

use crate::protocol::ModelDescriptor;

/// Shared state for the `/v1` handlers
#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    upstream: Arc<dyn Upstream>,
    model: ModelDescriptor,
    stream_buffer: usize,
}

impl AppState {
    pub(crate) fn new(config: &Config, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                upstream,
                model: ModelDescriptor::from_config(&config.model),
                stream_buffer: config.server.stream_buffer,
            }),
        }
    }

    pub(crate) fn upstream(&self) -> &dyn Upstream {
        self.inner.upstream.as_ref()
    }

    /// The single model this proxy serves
    pub(crate) fn model(&self) -> &ModelDescriptor {
        &self.inner.model
    }

    pub(crate) fn stream_buffer(&self) -> usize {
        self.inner.stream_buffer
    }
}
