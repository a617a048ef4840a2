//! Station directory.
//!
//! An explicitly constructed handle on the current network snapshot,
//! passed to whoever needs station lookups. It is fetched once at startup
//! and can be refreshed in the background.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Station, StationId};
use crate::network::{NetworkBackend, StationDto, convert_station};

use super::cache::StationCache;
use super::error::StationError;

/// Immutable lookup tables over one network snapshot.
#[derive(Debug, Default)]
pub struct StationIndex {
    by_id: HashMap<StationId, Arc<Station>>,
    by_code: HashMap<String, Arc<Station>>,
    /// Visible stations sorted by display name, for autocomplete.
    visible: Vec<Arc<Station>>,
}

impl StationIndex {
    /// Build the index. Ids and codes must be unique within a snapshot;
    /// on a clash the first station wins and the clash is logged.
    pub fn build(stations: &[StationDto]) -> Self {
        let mut by_id = HashMap::with_capacity(stations.len());
        let mut by_code = HashMap::with_capacity(stations.len());

        for dto in stations {
            let station = Arc::new(convert_station(dto));

            if by_id.contains_key(&station.id) {
                tracing::warn!(
                    id = %station.id,
                    code = %station.code,
                    "duplicate station id, skipped"
                );
                continue;
            }
            match by_code.entry(station.code.clone()) {
                Entry::Occupied(_) => {
                    tracing::warn!(
                        id = %station.id,
                        code = %station.code,
                        "duplicate station code, skipped"
                    );
                    continue;
                }
                Entry::Vacant(slot) => {
                    slot.insert(station.clone());
                }
            }
            by_id.insert(station.id, station);
        }

        let mut visible: Vec<_> = by_id.values().filter(|s| s.is_visible).cloned().collect();
        visible.sort_by_cached_key(|s| (s.display_name.to_lowercase(), s.id));

        Self {
            by_id,
            by_code,
            visible,
        }
    }

    pub fn get_by_code(&self, code: &str) -> Option<&Arc<Station>> {
        self.by_code.get(code)
    }

    pub fn get_by_id(&self, id: StationId) -> Option<&Arc<Station>> {
        self.by_id.get(&id)
    }

    /// Resolve user input: an exact station code first, then a visible
    /// station whose display name matches ignoring case.
    pub fn resolve(&self, input: &str) -> Option<&Arc<Station>> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(station) = self.by_code.get(input) {
            return Some(station);
        }

        let wanted = input.to_lowercase();
        self.visible
            .iter()
            .find(|s| s.display_name.to_lowercase() == wanted)
    }

    /// Autocomplete over visible stations.
    ///
    /// Names or codes starting with the query come first, then those merely
    /// containing it; each group in alphabetical order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<Arc<Station>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut prefix = Vec::new();
        let mut contains = Vec::new();
        for station in &self.visible {
            let name = station.display_name.to_lowercase();
            let code = station.code.to_lowercase();
            if name.starts_with(&query) || code.starts_with(&query) {
                prefix.push(station.clone());
            } else if name.contains(&query) || code.contains(&query) {
                contains.push(station.clone());
            }
        }

        prefix.extend(contains);
        prefix.truncate(limit);
        prefix
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Thread-safe station directory with support for background refresh.
#[derive(Clone)]
pub struct StationDirectory {
    inner: Arc<RwLock<StationIndex>>,
    backend: Arc<NetworkBackend>,
}

impl StationDirectory {
    /// Create a directory by fetching stations from the provider.
    pub async fn fetch(backend: Arc<NetworkBackend>) -> Result<Self, StationError> {
        let stations = backend.get_stations().await?;
        Self::from_stations(&stations, backend)
    }

    /// Create a directory from an already fetched list (e.g. a disk snapshot).
    pub fn from_stations(
        stations: &[StationDto],
        backend: Arc<NetworkBackend>,
    ) -> Result<Self, StationError> {
        if stations.is_empty() {
            return Err(StationError::Empty);
        }

        Ok(Self {
            inner: Arc::new(RwLock::new(StationIndex::build(stations))),
            backend,
        })
    }

    pub async fn get_by_code(&self, code: &str) -> Option<Arc<Station>> {
        self.inner.read().await.get_by_code(code).cloned()
    }

    pub async fn get_by_id(&self, id: StationId) -> Option<Arc<Station>> {
        self.inner.read().await.get_by_id(id).cloned()
    }

    /// See [`StationIndex::resolve`].
    pub async fn resolve(&self, input: &str) -> Option<Arc<Station>> {
        self.inner.read().await.resolve(input).cloned()
    }

    /// See [`StationIndex::search`].
    pub async fn search(&self, query: &str, limit: usize) -> Vec<Arc<Station>> {
        self.inner.read().await.search(query, limit)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Refresh the station data from the provider.
    ///
    /// On success, replaces the current snapshot and writes it to `cache` if
    /// given. On failure, the existing snapshot is kept and the error is
    /// returned.
    pub async fn refresh(&self, cache: Option<&StationCache>) -> Result<usize, StationError> {
        let stations = self.backend.get_stations().await?;
        if stations.is_empty() {
            return Err(StationError::Empty);
        }

        let index = StationIndex::build(&stations);
        let count = index.len();
        *self.inner.write().await = index;

        if let Some(cache) = cache
            && let Err(e) = cache.save(&stations)
        {
            tracing::warn!(
                path = %cache.path().display(),
                error = %e,
                "failed to save station snapshot"
            );
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::FixtureNetworkClient;
    use crate::stations::StationCacheConfig;

    fn dto(id: u32, code: &str, name: &str, visible: bool) -> StationDto {
        StationDto {
            id,
            code_name: code.to_string(),
            full_name: name.to_string(),
            x: 0,
            y: 0,
            is_visible: visible,
            is_safe: true,
            is_portal: false,
            is_intersection: true,
        }
    }

    fn sample() -> Vec<StationDto> {
        vec![
            dto(1, "spawn", "Spawn", true),
            dto(2, "port", "Port de l'Ouest", true),
            dto(3, "portail", "Portail du Nether", true),
            dto(4, "relais", "Relais", false),
            dto(5, "sport", "Stade", true),
        ]
    }

    #[test]
    fn build_skips_duplicates() {
        let mut stations = sample();
        stations.push(dto(1, "other", "Other", true));
        stations.push(dto(9, "spawn", "Second spawn", true));

        let index = StationIndex::build(&stations);
        assert_eq!(index.len(), 5);
        assert_eq!(index.get_by_code("spawn").map(|s| s.id), Some(StationId(1)));
        assert!(index.get_by_code("other").is_none());
        assert!(index.get_by_id(StationId(9)).is_none());
    }

    #[test]
    fn resolve_by_code_then_name() {
        let index = StationIndex::build(&sample());

        assert_eq!(index.resolve("port").map(|s| s.id), Some(StationId(2)));
        assert_eq!(
            index.resolve("  port de l'ouest ").map(|s| s.id),
            Some(StationId(2))
        );
        assert_eq!(index.resolve("relais").map(|s| s.id), Some(StationId(4)));
        assert!(index.resolve("Relais").is_none());
        assert!(index.resolve("").is_none());
        assert!(index.resolve("atlantis").is_none());
    }

    #[test]
    fn search_orders_prefix_matches_first() {
        let index = StationIndex::build(&sample());

        let codes: Vec<_> = index
            .search("port", 10)
            .iter()
            .map(|s| s.code.clone())
            .collect();
        assert_eq!(codes, vec!["port", "portail", "sport"]);
    }

    #[test]
    fn search_hides_invisible_and_respects_limit() {
        let index = StationIndex::build(&sample());

        assert!(index.search("relais", 10).is_empty());
        assert_eq!(index.search("port", 1).len(), 1);
        assert!(index.search("   ", 10).is_empty());
    }

    #[tokio::test]
    async fn directory_from_fixtures() {
        let backend = Arc::new(NetworkBackend::Fixtures(
            FixtureNetworkClient::new("data/fixtures").unwrap(),
        ));

        let directory = StationDirectory::fetch(backend).await.unwrap();
        assert!(!directory.is_empty().await);
        let spawn = directory.get_by_code("spawn").await.unwrap();
        assert_eq!(directory.get_by_id(spawn.id).await, Some(spawn.clone()));
        assert_eq!(directory.resolve("Spawn").await.map(|s| s.id), Some(spawn.id));
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot_and_saves_it() {
        let backend = Arc::new(NetworkBackend::Fixtures(
            FixtureNetworkClient::new("data/fixtures").unwrap(),
        ));
        let directory =
            StationDirectory::from_stations(&[dto(1, "spawn", "Spawn", true)], backend).unwrap();
        assert_eq!(directory.len().await, 1);

        let dir = tempfile::tempdir().unwrap();
        let cache = StationCache::new(StationCacheConfig::new(dir.path().join("stations.json")));

        let count = directory.refresh(Some(&cache)).await.unwrap();
        assert!(count > 1);
        assert_eq!(directory.len().await, count);
        assert_eq!(cache.load().map(|s| s.len()), Ok(count));
    }

    #[test]
    fn empty_list_is_rejected() {
        let backend = Arc::new(NetworkBackend::Fixtures(
            FixtureNetworkClient::new("data/fixtures").unwrap(),
        ));
        assert!(matches!(
            StationDirectory::from_stations(&[], backend),
            Err(StationError::Empty)
        ));
    }
}
