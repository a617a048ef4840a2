//! Application state for the web layer.

use std::sync::Arc;

use crate::network::NetworkBackend;
use crate::planner::RouteConfig;
use crate::stations::StationDirectory;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Routing provider (live and cached, or fixtures)
    pub backend: Arc<NetworkBackend>,

    /// Station lookups and autocomplete
    pub stations: StationDirectory,

    /// Hub comparison settings
    pub config: Arc<RouteConfig>,
}

impl AppState {
    pub fn new(
        backend: Arc<NetworkBackend>,
        stations: StationDirectory,
        config: RouteConfig,
    ) -> Self {
        Self {
            backend,
            stations,
            config: Arc::new(config),
        }
    }
}
