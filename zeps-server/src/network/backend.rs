//! Selection between the live provider and the fixture provider.

use crate::cache::CachedNetworkClient;
use crate::domain::RoutingPath;
use crate::planner::PathProvider;

use super::error::NetworkError;
use super::fixtures::FixtureNetworkClient;
use super::types::StationDto;

/// Where paths and stations come from.
pub enum NetworkBackend {
    /// The routing API, behind the path cache.
    Live(CachedNetworkClient),
    /// JSON fixtures loaded at startup.
    Fixtures(FixtureNetworkClient),
}

impl NetworkBackend {
    /// Fetch the path between two station codes.
    pub async fn get_path(&self, from: &str, to: &str) -> Result<RoutingPath, NetworkError> {
        match self {
            NetworkBackend::Live(client) => client.get_path(from, to).await,
            NetworkBackend::Fixtures(fixtures) => fixtures.get_path(from, to),
        }
    }

    /// Fetch the station list.
    pub async fn get_stations(&self) -> Result<Vec<StationDto>, NetworkError> {
        match self {
            NetworkBackend::Live(client) => client.get_stations().await,
            NetworkBackend::Fixtures(fixtures) => Ok(fixtures.get_stations()),
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NetworkBackend::Live(_) => "live",
            NetworkBackend::Fixtures(_) => "fixtures",
        }
    }
}

impl PathProvider for NetworkBackend {
    async fn fetch_path(&self, from: &str, to: &str) -> Result<RoutingPath, NetworkError> {
        self.get_path(from, to).await
    }
}
