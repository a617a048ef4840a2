//! Routing provider error types.

/// Errors from fetching data from the routing provider.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The provider reports that no path links the two stations.
    #[error("no path from {from} to {to}")]
    PathNotFound { from: String, to: String },

    /// The response does not have the expected shape.
    #[error("malformed provider response: {message}")]
    MalformedResponse {
        message: String,
        body: Option<String>,
    },

    /// The provider answered with an error status, or refused the request.
    #[error("routing provider unavailable: {message}")]
    ProviderUnavailable { status: Option<u16>, message: String },

    /// The provider rejected our credentials (HTTP 401/403).
    #[error("routing provider refused access (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Rate limited by the provider.
    #[error("rate limited by routing provider")]
    RateLimited,

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Client or fixture set-up failed.
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl NetworkError {
    /// Whether the failure means "there is no route", as opposed to
    /// "we could not find out".
    pub fn is_path_not_found(&self) -> bool {
        matches!(self, NetworkError::PathNotFound { .. })
    }
}
