//! Server state shared across connection handlers.

use super::registry::RoomRegistry;

/// Shared application state
pub struct AppState {
    /// Room registry, created at server start and shared by every handler
    pub registry: RoomRegistry,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            registry: RoomRegistry::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
