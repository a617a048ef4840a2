//! Route selection.
//!
//! Pathfinding happens on the routing provider. This module decides which
//! of the fetched paths to show: the direct one, or one starting from a hub
//! station the player can teleport to.

mod config;
mod search;
mod select;

pub use config::RouteConfig;
pub use search::{PathProvider, RouteSearch, SearchError};
pub use select::{HubCandidate, RouteChoice, select_shortest};
