//! Network stations.

use std::fmt;

use serde::Serialize;

/// Externally assigned station identifier, stable across network fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(pub u32);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Block coordinates of a station in the world (`x`, `z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coordinates {
    pub x: i32,
    pub z: i32,
}

impl Coordinates {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// A node of the rail network.
///
/// Stations are built once per network fetch and shared behind `Arc`
/// by every step that references them; nothing mutates them afterwards.
///
/// # Examples
///
/// ```
/// use zeps_server::domain::{Coordinates, Station, StationId};
///
/// let station = Station::new(StationId(1), "spawn", "Spawn", Coordinates::new(0, 0))
///     .with_intersection(true);
/// assert!(station.is_intersection);
/// assert!(station.is_visible);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    /// Stable identifier.
    pub id: StationId,
    /// Internal code, unique across the network (used in URLs and lookups).
    pub code: String,
    /// Human readable name.
    pub display_name: String,
    pub location: Coordinates,
    /// Invisible stations exist for connectivity only and are never shown.
    pub is_visible: bool,
    pub is_safe: bool,
    pub is_portal: bool,
    /// Junctions where the traveller may have to change line.
    pub is_intersection: bool,
}

impl Station {
    /// Create a visible station with every other flag unset.
    pub fn new(
        id: StationId,
        code: impl Into<String>,
        display_name: impl Into<String>,
        location: Coordinates,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            display_name: display_name.into(),
            location,
            is_visible: true,
            is_safe: false,
            is_portal: false,
            is_intersection: false,
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }

    pub fn with_safe(mut self, safe: bool) -> Self {
        self.is_safe = safe;
        self
    }

    pub fn with_portal(mut self, portal: bool) -> Self {
        self.is_portal = portal;
        self
    }

    pub fn with_intersection(mut self, intersection: bool) -> Self {
        self.is_intersection = intersection;
        self
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}
