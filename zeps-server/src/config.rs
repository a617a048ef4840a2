//! Server configuration from environment variables.
//!
//! | Variable                  | Default                        |
//! |---------------------------|--------------------------------|
//! | `ZEPS_BIND`               | `127.0.0.1:3000`               |
//! | `ZEPS_API_URL`            | `http://127.0.0.1:8081/api/`   |
//! | `ZEPS_API_TIMEOUT_SECS`   | `30`                           |
//! | `ZEPS_MAX_CONCURRENT`     | `4`                            |
//! | `ZEPS_PATH_CACHE_SECS`    | `300`                          |
//! | `ZEPS_THRESHOLD_SECS`     | `60`                           |
//! | `ZEPS_HUBS`               | `spawn` (comma separated)      |
//! | `ZEPS_STATIC_DIR`         | `static`                       |
//! | `ZEPS_STATION_CACHE`      | `stations_cache.json`          |
//! | `ZEPS_FIXTURES_DIR`       | unset (use the live API)       |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::network::NetworkConfig;
use crate::planner::RouteConfig;
use crate::stations::StationCacheConfig;

/// Error raised when an environment variable cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub network: NetworkConfig,
    pub cache: CacheConfig,
    pub route: RouteConfig,
    pub static_dir: PathBuf,
    pub station_cache: StationCacheConfig,
    /// Serve fixtures from this directory instead of calling the API.
    pub fixtures_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = parse_or(&lookup, "ZEPS_BIND", SocketAddr::from(([127, 0, 0, 1], 3000)))?;

        let mut network = match lookup("ZEPS_API_URL") {
            Some(url) => NetworkConfig::new(url),
            None => NetworkConfig::default(),
        };
        network.timeout_secs = parse_or(&lookup, "ZEPS_API_TIMEOUT_SECS", network.timeout_secs)?;
        network.max_concurrent =
            parse_or(&lookup, "ZEPS_MAX_CONCURRENT", network.max_concurrent)?;

        let mut cache = CacheConfig::default();
        cache.ttl = Duration::from_secs(parse_or(
            &lookup,
            "ZEPS_PATH_CACHE_SECS",
            cache.ttl.as_secs(),
        )?);

        let mut route = RouteConfig::default();
        route.threshold_secs = parse_or(&lookup, "ZEPS_THRESHOLD_SECS", route.threshold_secs)?;
        if route.threshold_secs < 0 {
            return Err(ConfigError {
                key: "ZEPS_THRESHOLD_SECS",
                value: route.threshold_secs.to_string(),
                reason: "must not be negative".to_string(),
            });
        }
        if chrono::Duration::try_seconds(route.threshold_secs).is_none() {
            return Err(ConfigError {
                key: "ZEPS_THRESHOLD_SECS",
                value: route.threshold_secs.to_string(),
                reason: "out of range".to_string(),
            });
        }
        if let Some(hubs) = lookup("ZEPS_HUBS") {
            route.hubs = parse_list(&hubs);
        }

        let static_dir = lookup("ZEPS_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("static"));

        let station_cache = lookup("ZEPS_STATION_CACHE")
            .map(StationCacheConfig::new)
            .unwrap_or_default()
            .with_source(network.base_url.clone());

        let fixtures_dir = lookup("ZEPS_FIXTURES_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            network,
            cache,
            route,
            static_dir,
            station_cache,
            fixtures_dir,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

/// Split a comma separated list, dropping blanks.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
