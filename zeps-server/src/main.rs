use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use zeps_server::cache::CachedNetworkClient;
use zeps_server::config::ServerConfig;
use zeps_server::network::{FixtureNetworkClient, NetworkBackend, NetworkClient};
use zeps_server::stations::{StationCache, StationDirectory};
use zeps_server::web::{AppState, create_router};

/// How often to refresh the station list (24 hours).
const STATION_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let backend = match &config.fixtures_dir {
        Some(dir) => {
            let fixtures = FixtureNetworkClient::new(dir)?;
            tracing::info!(
                dir = %dir.display(),
                paths = fixtures.available_pairs().len(),
                "serving routes from fixtures"
            );
            NetworkBackend::Fixtures(fixtures)
        }
        None => {
            let client = NetworkClient::new(config.network.clone())?;
            tracing::info!(api = %config.network.base_url, "using routing API");
            NetworkBackend::Live(CachedNetworkClient::new(client, &config.cache))
        }
    };
    let backend = Arc::new(backend);

    // Fixtures are already local, only the live API gets a disk snapshot.
    let station_cache = matches!(*backend, NetworkBackend::Live(_))
        .then(|| StationCache::new(config.station_cache.clone()));

    let snapshot = station_cache.as_ref().and_then(|cache| match cache.load() {
        Ok(stations) => Some(stations),
        Err(miss) => {
            tracing::info!(
                path = %cache.path().display(),
                reason = %miss,
                "station snapshot not used"
            );
            None
        }
    });

    let stations = match snapshot {
        Some(snapshot) => {
            tracing::info!(
                path = %config.station_cache.path.display(),
                "loaded station snapshot from disk"
            );
            StationDirectory::from_stations(&snapshot, backend.clone())?
        }
        None => {
            tracing::info!(backend = backend.kind(), "fetching station list");
            let stations = backend.get_stations().await?;
            if let Some(cache) = &station_cache
                && let Err(e) = cache.save(&stations)
            {
                tracing::warn!(error = %e, "failed to save station snapshot");
            }
            StationDirectory::from_stations(&stations, backend.clone())?
        }
    };
    tracing::info!(count = stations.len().await, "station directory ready");

    let refresh = stations.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(STATION_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match refresh.refresh(station_cache.as_ref()).await {
                Ok(count) => tracing::info!(count, "refreshed station list"),
                Err(e) => tracing::warn!(error = %e, "failed to refresh station list"),
            }
        }
    });

    let state = AppState::new(backend, stations, config.route.clone());
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        hubs = ?config.route.hubs,
        threshold_secs = config.route.threshold_secs,
        "ZéPS route planner listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
