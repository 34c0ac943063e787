// Application state module
// Owns everything a request handler needs, built once at startup

use crate::routing::RouteTable;

use super::types::Config;

/// Application state, immutable after construction.
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
}

impl AppState {
    /// Build the state from a loaded configuration.
    ///
    /// The route table is fixed at startup and never changes afterwards.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            routes: RouteTable::new(),
        }
    }
}
