//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ChatConfig;
use crate::groq::GroqClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ChatConfig,
    groq: GroqClient,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("groq", &self.inner.groq)
            .finish_non_exhaustive()
    }
}

impl AppState {
    #[must_use]
    pub fn new(config: ChatConfig) -> Self {
        let groq = GroqClient::new(&config.groq);
        Self {
            inner: Arc::new(AppStateInner { config, groq }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ChatConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn groq(&self) -> &GroqClient {
        &self.inner.groq
    }
}
