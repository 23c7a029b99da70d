//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::SkyMapService;

/// Values the page pre-selects.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDefaults {
    pub location: String,
    pub hour: u32,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            location: "San Francisco".to_string(),
            hour: 22,
        }
    }
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Sky map service; read-only after startup
    pub service: Arc<SkyMapService>,
    pub defaults: PageDefaults,
}

impl AppState {
    /// Create a new application state around a service.
    pub fn new(service: Arc<SkyMapService>) -> Self {
        Self {
            service,
            defaults: PageDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: PageDefaults) -> Self {
        self.defaults = defaults;
        self
    }
}
