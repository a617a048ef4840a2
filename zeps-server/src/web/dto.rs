//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{
    AlternativeKind, AlternativeRoutingPath, Direction, RoutingPath, RoutingPathCompactStep,
    Station, format_duration_fr,
};
use crate::planner::RouteChoice;

/// Query of `GET /route`.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin station code or name
    pub from: String,

    /// Destination station code or name
    pub to: String,

    /// Keep the direct route even when a hub is faster
    pub direct: Option<String>,
}

impl RouteRequest {
    /// Whether the `direct` flag is set to a truthy value.
    pub fn force_direct(&self) -> bool {
        self.direct.as_deref().is_some_and(is_truthy)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes")
}

/// A station in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationResult {
    pub id: u32,
    pub code: String,
    pub name: String,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.0,
            code: station.code.clone(),
            name: station.display_name.clone(),
        }
    }
}

/// One compact step of a route.
#[derive(Debug, Serialize)]
pub struct CompactStepResult {
    pub from: StationResult,

    /// Last intersection of the run, if it crossed one
    pub to: Option<StationResult>,

    pub direction: Direction,
    pub is_rail: bool,

    /// Length in blocks
    pub length: u64,

    /// Intersections along the run
    pub stops: Vec<StationResult>,

    /// Stations passed without a stop
    pub no_stop_count: usize,
}

impl CompactStepResult {
    pub fn from_compact_step(step: &RoutingPathCompactStep) -> Self {
        Self {
            from: StationResult::from_station(step.station_from()),
            to: step.station_to().map(|s| StationResult::from_station(s)),
            direction: step.direction(),
            is_rail: step.is_rail(),
            length: step.length(),
            stops: step
                .steps()
                .iter()
                .map(|s| StationResult::from_station(s.station()))
                .collect(),
            no_stop_count: step.no_stop_steps_count(),
        }
    }
}

/// The route offered next to the displayed one.
#[derive(Debug, Serialize)]
pub struct AlternativeResult {
    pub name: AlternativeKind,

    /// Alternative travel time minus displayed travel time, in seconds
    pub diff_secs: i64,

    /// Same difference in words
    pub diff_label: String,

    pub travel_time_secs: i64,
    pub from: StationResult,
}

impl AlternativeResult {
    pub fn from_alternative(alternative: &AlternativeRoutingPath) -> Self {
        Self {
            name: alternative.name(),
            diff_secs: alternative.length_diff().num_seconds(),
            diff_label: alternative.time_diff_label(),
            travel_time_secs: alternative.alternative().travel_time().num_seconds(),
            from: StationResult::from_station(alternative.alternative().first_station()),
        }
    }
}

/// Response of `GET /route` in JSON.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub from: StationResult,
    pub to: StationResult,

    /// Hub the player should teleport to first
    pub via_hub: Option<String>,

    pub travel_time_secs: i64,
    pub travel_time_label: String,

    /// Length in blocks
    pub length: u64,

    /// Visible stations along the route
    pub stations_count: usize,

    pub has_unofficial_sections: bool,
    pub steps: Vec<CompactStepResult>,
    pub alternative: Option<AlternativeResult>,
}

impl RouteResponse {
    pub fn from_choice(choice: &RouteChoice) -> Self {
        let route: &RoutingPath = choice.route();

        Self {
            from: StationResult::from_station(route.first_station()),
            to: StationResult::from_station(route.last_station()),
            via_hub: choice.via_hub().map(str::to_string),
            travel_time_secs: route.travel_time().num_seconds(),
            travel_time_label: format_duration_fr(route.travel_time()),
            length: route.length(),
            stations_count: route.stations_count(),
            has_unofficial_sections: route.has_unofficial_sections(),
            steps: route
                .compact_path()
                .unwrap_or_default()
                .iter()
                .map(CompactStepResult::from_compact_step)
                .collect(),
            alternative: choice.alternative().map(AlternativeResult::from_alternative),
        }
    }
}

/// Query of `GET /api/stations/search`.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Search query (prefix or substring of the station name)
    pub q: String,

    /// Maximum results (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// Station search response.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationResult>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
