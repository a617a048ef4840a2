//! Station directory error types.

use crate::network::NetworkError;

/// Errors that can occur while loading or refreshing stations.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// The routing provider could not supply the station list
    #[error("failed to fetch stations: {0}")]
    Network(#[from] NetworkError),

    /// The provider returned no stations at all
    #[error("station list is empty")]
    Empty,

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}
