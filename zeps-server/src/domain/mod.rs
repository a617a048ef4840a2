//! Domain types for the route search.
//!
//! Stations, raw path steps, compact steps and whole routing paths. Paths
//! arrive already computed from the routing provider; this module only
//! reshapes them for display.

mod alternative;
mod compact;
mod direction;
mod duration;
mod error;
mod path;
mod station;
mod step;

pub use alternative::{AlternativeKind, AlternativeRoutingPath};
pub use compact::RoutingPathCompactStep;
pub use direction::Direction;
pub use duration::format_duration_fr;
pub use error::DomainError;
pub use path::RoutingPath;
pub use station::{Coordinates, Station, StationId};
pub use step::{Hop, RoutingPathStep, StepLink};
