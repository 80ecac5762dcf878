//! Application state management

use cardex::extraction::Extractor;

use crate::config::ServerConfig;

/// Application state shared across all handlers
///
/// Read-only after startup; handlers only ever borrow it.
#[derive(Debug)]
pub struct AppState {
    /// Extraction pipeline (inference client + output sink)
    pub extractor: Extractor,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(extractor: Extractor, config: ServerConfig) -> Self {
        Self { extractor, config }
    }
}
