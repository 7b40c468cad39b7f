//! Application state shared across handlers

use crate::config::Settings;
use crate::engine::EngineClient;
use std::sync::Arc;

/// Shared application state
///
/// Constructed once at startup and injected into the router; handlers
/// reach the engine through this handle, never through globals.
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Engine connection
    pub engine: Arc<EngineClient>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, engine: EngineClient) -> Self {
        Self {
            settings: Arc::new(settings),
            engine: Arc::new(engine),
        }
    }

    /// Index holding product documents
    pub fn product_index(&self) -> &str {
        &self.settings.engine.product_index
    }

    /// Index holding the completion vocabulary
    pub fn vocab_index(&self) -> &str {
        &self.settings.engine.vocab_index
    }
}
