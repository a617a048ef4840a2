//! Fixture-backed routing provider for running without the live API.
//!
//! Loads a station list and precomputed paths from JSON files and serves
//! them as if they were live provider responses.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::RoutingPath;

use super::convert::convert_path;
use super::error::NetworkError;
use super::types::{PathResponse, StationDto, StationsResponse};

/// Separator between origin and destination codes in fixture file names.
const PAIR_SEPARATOR: &str = "__";

/// Routing provider serving data from a fixture directory.
///
/// Expects `stations.json` and a `paths/` directory of files named
/// `{from}__{to}.json`, each holding a provider path response.
#[derive(Debug, Clone)]
pub struct FixtureNetworkClient {
    stations: Vec<StationDto>,
    paths: HashMap<(String, String), PathResponse>,
}

impl FixtureNetworkClient {
    /// Load fixtures from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let data_dir = data_dir.as_ref();

        let stations_file = data_dir.join("stations.json");
        let stations = match read_json::<StationsResponse>(&stations_file)? {
            StationsResponse::Success { stations } => stations,
            StationsResponse::Failure { .. } => {
                return Err(NetworkError::NotConfigured(format!(
                    "{} holds a failure response",
                    stations_file.display()
                )));
            }
        };

        let paths_dir = data_dir.join("paths");
        let entries = std::fs::read_dir(&paths_dir).map_err(|e| {
            NetworkError::NotConfigured(format!("failed to read {}: {e}", paths_dir.display()))
        })?;

        let mut paths = HashMap::new();
        for entry in entries {
            let path = entry
                .map_err(|e| NetworkError::NotConfigured(format!("failed to read entry: {e}")))?
                .path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let pair = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|stem| stem.split_once(PAIR_SEPARATOR))
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .ok_or_else(|| {
                    NetworkError::NotConfigured(format!(
                        "fixture name must be from{PAIR_SEPARATOR}to: {}",
                        path.display()
                    ))
                })?;

            paths.insert(pair, read_json(&path)?);
        }

        tracing::info!(
            dir = %data_dir.display(),
            stations = stations.len(),
            paths = paths.len(),
            "loaded routing fixtures"
        );

        Ok(Self { stations, paths })
    }

    /// Mimics [`super::NetworkClient::get_path`]; unknown pairs have no path.
    pub fn get_path(&self, from: &str, to: &str) -> Result<RoutingPath, NetworkError> {
        let not_found = || NetworkError::PathNotFound {
            from: from.to_string(),
            to: to.to_string(),
        };

        match self.paths.get(&(from.to_string(), to.to_string())) {
            Some(PathResponse::Success(payload)) => {
                convert_path(payload).map_err(|e| NetworkError::MalformedResponse {
                    message: e.to_string(),
                    body: None,
                })
            }
            Some(PathResponse::Failure { .. }) | None => Err(not_found()),
        }
    }

    /// Mimics [`super::NetworkClient::get_stations`].
    pub fn get_stations(&self) -> Vec<StationDto> {
        self.stations.clone()
    }

    /// Origin/destination pairs with a fixture file.
    pub fn available_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<_> = self.paths.keys().cloned().collect();
        pairs.sort();
        pairs
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, NetworkError> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        NetworkError::NotConfigured(format!("failed to read {}: {e}", path.display()))
    })?;

    serde_json::from_str(&json).map_err(|e| NetworkError::MalformedResponse {
        message: format!("{}: {e}", path.display()),
        body: None,
    })
}
