//! Routing provider client.
//!
//! The provider runs the shortest-path search over the rail network and
//! returns a station-by-station path with per-hop metadata. This module
//! fetches those paths, validates their shape and converts them into
//! domain types.
//!
//! Failures are discriminated: "no path exists" is `PathNotFound`, every
//! other failure means the provider could not be asked.

mod backend;
mod client;
mod convert;
mod error;
mod fixtures;
#[cfg(test)]
pub(crate) mod stub;
mod types;

pub use backend::NetworkBackend;
pub use client::{NetworkClient, NetworkConfig};
pub use convert::{ConversionError, convert_path, convert_station};
pub use error::NetworkError;
pub use fixtures::FixtureNetworkClient;
pub use types::{
    ConnectionDto, PathEntryDto, PathPayload, PathResponse, StationDto, StationsResponse,
};
