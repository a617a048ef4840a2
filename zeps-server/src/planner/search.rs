//! Route search: direct path plus hub comparison.
//!
//! Fetches the direct path and one path per configured hub, then hands
//! them to [`RouteChoice::build`]. Hub lookups are independent reads, so
//! they are issued together; results are folded in configuration order so
//! the outcome does not depend on which request finishes first.

use std::future::Future;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{DomainError, RoutingPath};
use crate::network::NetworkError;

use super::config::RouteConfig;
use super::select::{HubCandidate, RouteChoice};

/// Error from route search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The provider reports that no route links the two stations
    #[error("no route from {from} to {to}")]
    Unreachable { from: String, to: String },

    /// The provider could not be queried or answered nonsense
    #[error("routing provider error: {0}")]
    Provider(NetworkError),

    /// Paths could not be compacted
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<NetworkError> for SearchError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::PathNotFound { from, to } => SearchError::Unreachable { from, to },
            other => SearchError::Provider(other),
        }
    }
}

/// Trait for providing precomputed paths.
///
/// This abstraction allows the search to be tested with mock data.
pub trait PathProvider {
    /// Fetch the path between two station codes.
    fn fetch_path(
        &self,
        from: &str,
        to: &str,
    ) -> impl Future<Output = Result<RoutingPath, NetworkError>> + Send;
}

/// Route search over a path provider.
pub struct RouteSearch<'a, P: PathProvider> {
    provider: &'a P,
    config: &'a RouteConfig,
}

impl<'a, P: PathProvider + Sync> RouteSearch<'a, P> {
    pub fn new(provider: &'a P, config: &'a RouteConfig) -> Self {
        Self { provider, config }
    }

    /// Search the route between two station codes.
    ///
    /// A failure on the direct path aborts the search. A failing hub lookup
    /// only removes that hub from the comparison.
    pub async fn search(
        &self,
        origin: &str,
        destination: &str,
        force_direct: bool,
    ) -> Result<RouteChoice, SearchError> {
        let hubs: Vec<&str> = self
            .config
            .hubs
            .iter()
            .map(String::as_str)
            .filter(|hub| *hub != origin)
            .collect();

        let direct_fetch = self.provider.fetch_path(origin, destination);
        let hub_fetches = join_all(
            hubs.iter()
                .map(|hub| self.provider.fetch_path(*hub, destination)),
        );
        let (direct, hub_paths) = futures::join!(direct_fetch, hub_fetches);

        let direct = direct?;
        debug!(
            origin,
            destination,
            travel_secs = direct.travel_time().num_seconds(),
            "fetched direct path"
        );

        let candidates: Vec<HubCandidate> = hubs
            .into_iter()
            .zip(hub_paths)
            .filter_map(|(hub, result)| match result {
                Ok(path) => Some(HubCandidate::new(hub, path)),
                Err(e) => {
                    warn!(hub, destination, error = %e, "hub lookup failed, skipping hub");
                    None
                }
            })
            .collect();

        let choice =
            RouteChoice::build(direct, candidates, self.config.threshold(), force_direct)?;
        Ok(choice)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
