//! Route search configuration.

use chrono::Duration;

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// How much faster (seconds) a hub route must be than the direct route
    /// before it is preferred. Reaching or leaving a hub costs time the
    /// provider does not count, so small gains are ignored.
    pub threshold_secs: i64,

    /// Codes of the hub stations tried as alternative starting points,
    /// in the order they are compared.
    pub hubs: Vec<String>,
}

impl RouteConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(threshold_secs: i64, hubs: Vec<String>) -> Self {
        Self {
            threshold_secs,
            hubs,
        }
    }

    /// Returns the threshold as a Duration, saturating at the largest
    /// representable one.
    pub fn threshold(&self) -> Duration {
        Duration::try_seconds(self.threshold_secs).unwrap_or(Duration::MAX)
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            threshold_secs: 60,
            hubs: vec!["spawn".to_string()],
        }
    }
}
