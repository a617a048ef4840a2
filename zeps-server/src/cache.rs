//! Caching layer for routing provider responses.
//!
//! Paths only change when the network is edited, so successful path
//! lookups are cached per (origin, destination) pair for a few minutes.
//! Failures are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::RoutingPath;
use crate::network::{NetworkClient, NetworkError, StationDto};

/// Cache key for paths: (origin code, destination code).
type PathKey = (String, String);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            max_capacity: 1000,
        }
    }
}

/// Cache for routing paths.
pub struct PathCache {
    paths: MokaCache<PathKey, Arc<RoutingPath>>,
}

impl PathCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let paths = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { paths }
    }

    /// Get a cached path.
    pub async fn get(&self, key: &PathKey) -> Option<Arc<RoutingPath>> {
        self.paths.get(key).await
    }

    /// Insert a path into the cache.
    pub async fn insert(&self, key: PathKey, path: Arc<RoutingPath>) {
        self.paths.insert(key, path).await;
    }
}

/// Routing provider client with caching.
///
/// Wraps a `NetworkClient` and caches successful path responses.
pub struct CachedNetworkClient {
    client: NetworkClient,
    cache: PathCache,
}

impl CachedNetworkClient {
    /// Create a new cached client.
    pub fn new(client: NetworkClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: PathCache::new(cache_config),
        }
    }

    /// Get the path between two stations, using the cache if available.
    ///
    /// Paths are handed out by value since callers compact them in place.
    pub async fn get_path(&self, from: &str, to: &str) -> Result<RoutingPath, NetworkError> {
        let key = (from.to_string(), to.to_string());

        if let Some(cached) = self.cache.get(&key).await {
            tracing::trace!(from, to, "path cache hit");
            return Ok(RoutingPath::clone(&cached));
        }

        let path = self.client.get_path(from, to).await?;
        self.cache.insert(key, Arc::new(path.clone())).await;

        Ok(path)
    }

    /// Get the station list. Not cached here; the station directory keeps
    /// its own copy.
    pub async fn get_stations(&self) -> Result<Vec<StationDto>, NetworkError> {
        self.client.get_stations().await
    }
}
