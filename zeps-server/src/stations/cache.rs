//! Disk snapshot of the station list.
//!
//! The server can start from the last known network when the provider is
//! slow or down. A snapshot is only trusted if it was taken from the same
//! provider, in the current format, recently enough, and if it still
//! satisfies the network invariants (non-empty, unique ids and codes).

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::network::StationDto;

use super::error::StationError;

/// Bumped whenever the snapshot layout changes.
const SNAPSHOT_VERSION: u32 = 1;

const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    /// Base URL of the provider the stations came from.
    source: String,
    saved_at_secs: u64,
    stations: Vec<StationDto>,
}

/// Why a snapshot on disk was not used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotMiss {
    #[error("no snapshot at this path")]
    Missing,

    #[error("snapshot unreadable: {0}")]
    Unreadable(String),

    #[error("snapshot format {found} is not supported")]
    Version { found: u32 },

    #[error("snapshot taken from {found}")]
    OtherSource { found: String },

    #[error("snapshot is {age_secs}s old")]
    Expired { age_secs: u64 },

    #[error("snapshot rejected: {0}")]
    Invalid(String),
}

/// Where and how long station snapshots are kept.
#[derive(Debug, Clone)]
pub struct StationCacheConfig {
    pub path: PathBuf,
    pub ttl: Duration,
    /// Provider identity recorded in the snapshot, usually its base URL.
    pub source: String,
}

impl StationCacheConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
            source: String::new(),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

impl Default for StationCacheConfig {
    fn default() -> Self {
        Self::new("stations_cache.json")
    }
}

/// Reads and writes station snapshots.
#[derive(Debug, Clone)]
pub struct StationCache {
    config: StationCacheConfig,
}

impl StationCache {
    pub fn new(config: StationCacheConfig) -> Self {
        Self { config }
    }

    /// Load the snapshot, or say why it cannot be used.
    pub fn load(&self) -> Result<Vec<StationDto>, SnapshotMiss> {
        let contents = match std::fs::read_to_string(&self.config.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SnapshotMiss::Missing);
            }
            Err(e) => return Err(SnapshotMiss::Unreadable(e.to_string())),
        };
        let file: SnapshotFile = serde_json::from_str(&contents)
            .map_err(|e| SnapshotMiss::Unreadable(e.to_string()))?;

        if file.version != SNAPSHOT_VERSION {
            return Err(SnapshotMiss::Version { found: file.version });
        }
        if file.source != self.config.source {
            return Err(SnapshotMiss::OtherSource { found: file.source });
        }

        let age_secs = unix_now()
            .unwrap_or(u64::MAX)
            .saturating_sub(file.saved_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            return Err(SnapshotMiss::Expired { age_secs });
        }

        check_network(&file.stations)?;
        Ok(file.stations)
    }

    /// Write a snapshot of `stations`.
    ///
    /// The file is written next to its final path and renamed over it, so a
    /// crash mid-write leaves the previous snapshot intact.
    pub fn save(&self, stations: &[StationDto]) -> Result<(), StationError> {
        check_network(stations).map_err(|e| StationError::Cache {
            message: e.to_string(),
        })?;

        let file = SnapshotFile {
            version: SNAPSHOT_VERSION,
            source: self.config.source.clone(),
            saved_at_secs: unix_now().ok_or_else(|| StationError::Cache {
                message: "system clock before 1970".to_string(),
            })?,
            stations: stations.to_vec(),
        };
        let json = serde_json::to_vec(&file).map_err(|e| StationError::Cache {
            message: e.to_string(),
        })?;

        let path = &self.config.path;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StationError::Cache {
                message: format!("cannot create {}: {e}", parent.display()),
            })?;
        }

        let partial = path.with_extension("partial");
        std::fs::write(&partial, json)
            .and_then(|()| std::fs::rename(&partial, path))
            .map_err(|e| StationError::Cache {
                message: format!("cannot write {}: {e}", path.display()),
            })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

fn unix_now() -> Option<u64> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

/// A network has stations, and ids and codes identify them uniquely.
fn check_network(stations: &[StationDto]) -> Result<(), SnapshotMiss> {
    if stations.is_empty() {
        return Err(SnapshotMiss::Invalid("no stations".to_string()));
    }

    let mut ids = HashSet::new();
    let mut codes = HashSet::new();
    for station in stations {
        if !ids.insert(station.id) {
            return Err(SnapshotMiss::Invalid(format!(
                "station id {} appears twice",
                station.id
            )));
        }
        if !codes.insert(station.code_name.as_str()) {
            return Err(SnapshotMiss::Invalid(format!(
                "station code {} appears twice",
                station.code_name
            )));
        }
    }
    Ok(())
}
