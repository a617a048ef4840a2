//! Conversion from provider DTOs to domain types.
//!
//! The provider is trusted for travel times but not for shape: every path is
//! checked for a consistent chain of connections before it becomes a
//! `RoutingPath`.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::domain::{
    Coordinates, DomainError, Hop, RoutingPath, RoutingPathStep, Station, StationId,
};

use super::types::{PathPayload, StationDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The path has no entries at all.
    #[error("path is empty")]
    EmptyPath,

    /// An entry other than the last has no connection.
    #[error("entry {index} has no connection")]
    MissingConnection { index: usize },

    /// The last entry has a connection leading nowhere.
    #[error("last entry has a connection")]
    DanglingConnection,

    /// A connection does not lead to the next entry's station.
    #[error("entry {index} connects to station {found} instead of {expected}")]
    BrokenLink {
        index: usize,
        expected: u32,
        found: u32,
    },

    /// `begin` or `end` disagree with the stations of the path.
    #[error("{field} is {declared} but path has {actual}")]
    EndpointMismatch {
        field: &'static str,
        declared: String,
        actual: String,
    },

    /// Travel time does not fit in a duration.
    #[error("travel time out of range: {0}")]
    TravelTimeOutOfRange(u64),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Convert a provider station.
pub fn convert_station(dto: &StationDto) -> Station {
    Station {
        id: StationId(dto.id),
        code: dto.code_name.clone(),
        display_name: dto.full_name.clone(),
        location: Coordinates::new(dto.x, dto.y),
        is_visible: dto.is_visible,
        is_safe: dto.is_safe,
        is_portal: dto.is_portal,
        is_intersection: dto.is_intersection,
    }
}

/// Convert a successful path response into a `RoutingPath`.
pub fn convert_path(payload: &PathPayload) -> Result<RoutingPath, ConversionError> {
    let stations: Vec<Arc<Station>> = payload
        .path
        .iter()
        .map(|entry| Arc::new(convert_station(&entry.station)))
        .collect();

    let (Some(first), Some(last)) = (stations.first(), stations.last()) else {
        return Err(ConversionError::EmptyPath);
    };

    check_endpoint("begin", &payload.begin, first)?;
    check_endpoint("end", &payload.end, last)?;

    let travel_time = i64::try_from(payload.travel_time)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or(ConversionError::TravelTimeOutOfRange(payload.travel_time))?;

    let mut path = RoutingPath::new(
        first.clone(),
        last.clone(),
        travel_time,
        StdDuration::from_millis(payload.time),
    );

    for (index, entry) in payload.path.iter().enumerate() {
        let station = stations[index].clone();

        let step = match (&entry.connection, stations.get(index + 1)) {
            (Some(connection), Some(next)) => {
                if connection.to != next.id.0 {
                    return Err(ConversionError::BrokenLink {
                        index,
                        expected: next.id.0,
                        found: connection.to,
                    });
                }
                RoutingPathStep::hop(
                    station,
                    Hop {
                        next_station: next.clone(),
                        direction: connection.direction,
                        length: connection.length,
                        is_official: connection.is_official,
                        is_rail: connection.is_rail,
                    },
                )
            }
            (None, None) => RoutingPathStep::terminal(station),
            (None, Some(_)) => return Err(ConversionError::MissingConnection { index }),
            (Some(_), None) => return Err(ConversionError::DanglingConnection),
        };

        path.add_step(step)?;
    }

    Ok(path)
}

fn check_endpoint(
    field: &'static str,
    declared: &str,
    station: &Station,
) -> Result<(), ConversionError> {
    if declared == station.code {
        Ok(())
    } else {
        Err(ConversionError::EndpointMismatch {
            field,
            declared: declared.to_string(),
            actual: station.code.clone(),
        })
    }
}
