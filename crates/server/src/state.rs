//! Application state shared across handlers.

use std::sync::Arc;

use slackgate_core::{SigningSecret, Verifier};

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc` and is read-only.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    verifier: Verifier,
}

impl AppState {
    /// Build state from loaded configuration.
    ///
    /// The signing secret is copied into the [`Verifier`] here, once, and
    /// never read from the environment again.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let verifier = Verifier::new(SigningSecret::from(&config.slack.signing_secret));

        Self {
            inner: Arc::new(AppStateInner { config, verifier }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn verifier(&self) -> &Verifier {
        &self.inner.verifier
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("verifier", &self.inner.verifier)
            .finish()
    }
}
