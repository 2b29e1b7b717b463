//! Application state shared across handlers.

use std::sync::Arc;

use crate::auditor::{Auditor, ClaudeClient, GenerateError};
use crate::config::ConsoleConfig;
use crate::console::Console;

/// Application state shared across all handlers.
///
/// The console is the single browser session the API drives; every request
/// sees the same session, view and mail log.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ConsoleConfig,
    console: Console,
}

impl AppState {
    /// Build the state from configuration, wiring the Claude client when an
    /// API key is configured.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] if the HTTP client cannot be built.
    pub fn from_config(config: ConsoleConfig) -> Result<Self, GenerateError> {
        let auditor = match config.auditor() {
            Some(auditor_config) => {
                let client = ClaudeClient::new(auditor_config)?;
                tracing::info!(model = client.model(), "Auditor configured");
                Auditor::new(Arc::new(client))
            }
            None => {
                tracing::warn!("AUDITOR_API_KEY not set, audits will return the fallback answer");
                Auditor::disabled()
            }
        };
        let console = Console::new(auditor, config.console_settings());
        Ok(Self::new(config, console))
    }

    #[must_use]
    pub fn new(config: ConsoleConfig, console: Console) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, console }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn console(&self) -> &Console {
        &self.inner.console
    }
}
