//! Station directory and its disk snapshot.
//!
//! Provides code/id/name lookups and autocomplete over the stations of the
//! current network, fetched from the routing provider at startup and
//! refreshed daily.

mod cache;
mod directory;
mod error;

pub use cache::{SnapshotMiss, StationCache, StationCacheConfig};
pub use directory::{StationDirectory, StationIndex};
pub use error::StationError;
