//! Routing provider HTTP client.
//!
//! Fetches precomputed paths and the station list from the routing API.
//! Pathfinding itself happens on the provider; this client only validates
//! and converts what comes back.

use std::sync::Arc;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use crate::domain::RoutingPath;

use super::convert::convert_path;
use super::error::NetworkError;
use super::types::{PathResponse, StationDto, StationsResponse};

/// Default base URL for the routing API.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8081/api/";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// How much of an unparseable body to keep for diagnostics.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the routing provider client.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Base URL of the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NetworkConfig {
    /// Create a config pointing at the given API.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Routing provider API client.
///
/// A semaphore bounds the number of requests in flight, so that hub
/// lookups fired together do not overwhelm the provider.
#[derive(Debug, Clone)]
pub struct NetworkClient {
    http: reqwest::Client,
    base_url: Url,
    semaphore: Arc<Semaphore>,
}

impl NetworkClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NetworkConfig) -> Result<Self, NetworkError> {
        let mut base = config.base_url;
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| NetworkError::NotConfigured(format!("invalid base URL {base}: {e}")))?;

        if config.max_concurrent == 0 {
            return Err(NetworkError::NotConfigured(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Fetch the path between two stations, by code.
    pub async fn get_path(&self, from: &str, to: &str) -> Result<RoutingPath, NetworkError> {
        let url = self.endpoint(&["path", from, to])?;

        let response: PathResponse = match self.get_json(url).await {
            Err(NetworkError::ProviderUnavailable {
                status: Some(404), ..
            }) => {
                return Err(NetworkError::PathNotFound {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
            other => other?,
        };

        match response {
            PathResponse::Success(payload) => {
                convert_path(&payload).map_err(|e| NetworkError::MalformedResponse {
                    message: e.to_string(),
                    body: None,
                })
            }
            PathResponse::Failure { reason } => {
                tracing::debug!(from, to, ?reason, "provider reports no path");
                Err(NetworkError::PathNotFound {
                    from: from.to_string(),
                    to: to.to_string(),
                })
            }
        }
    }

    /// Fetch every station of the network.
    pub async fn get_stations(&self) -> Result<Vec<StationDto>, NetworkError> {
        let url = self.endpoint(&["stations"])?;

        match self.get_json(url).await? {
            StationsResponse::Success { stations } => Ok(stations),
            StationsResponse::Failure { reason } => Err(NetworkError::ProviderUnavailable {
                status: None,
                message: reason.unwrap_or_else(|| "station list unavailable".to_string()),
            }),
        }
    }

    /// Build an endpoint URL from path segments, escaping each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, NetworkError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| NetworkError::NotConfigured("base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, NetworkError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| NetworkError::NotConfigured("semaphore closed".to_string()))?;

        tracing::debug!(%url, "querying routing provider");
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(NetworkError::RateLimited);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(NetworkError::Unauthorized {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NetworkError::ProviderUnavailable {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| NetworkError::MalformedResponse {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
        })
    }
}
