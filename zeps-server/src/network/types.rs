//! Routing provider response DTOs.
//!
//! These types map directly to the provider's JSON. Responses carry a
//! `result` tag; anything that does not match these shapes is rejected as a
//! malformed response.

use serde::{Deserialize, Serialize};

use crate::domain::Direction;

/// A station as described by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StationDto {
    pub id: u32,
    /// Internal code, unique across the network.
    pub code_name: String,
    pub full_name: String,
    pub x: i32,
    /// World `z` coordinate; the provider calls it `y`.
    pub y: i32,
    pub is_visible: bool,
    pub is_safe: bool,
    pub is_portal: bool,
    pub is_intersection: bool,
}

/// Edge leaving a path entry towards the next one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConnectionDto {
    /// Id of the next station on the path.
    pub to: u32,
    pub direction: Direction,
    pub length: u32,
    pub is_official: bool,
    pub is_rail: bool,
}

/// One entry of a path; the last entry has no connection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathEntryDto {
    pub station: StationDto,
    pub connection: Option<ConnectionDto>,
}

/// Body of a successful path response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathPayload {
    /// Origin station code.
    pub begin: String,
    /// Destination station code.
    pub end: String,
    /// Trip duration in seconds.
    pub travel_time: u64,
    /// Computation time in milliseconds.
    pub time: u64,
    pub path: Vec<PathEntryDto>,
}

/// Response from `GET /path/{from}/{to}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum PathResponse {
    Success(PathPayload),
    Failure {
        #[serde(default)]
        reason: Option<String>,
    },
}

/// Response from `GET /stations`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum StationsResponse {
    Success { stations: Vec<StationDto> },
    Failure {
        #[serde(default)]
        reason: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_success() {
        let json = r#"{
            "result": "success",
            "begin": "a",
            "end": "b",
            "travel_time": 42,
            "time": 3,
            "path": [
                {
                    "station": {"id": 1, "code_name": "a", "full_name": "A", "x": 0, "y": 5,
                                "is_visible": true, "is_safe": true, "is_portal": false, "is_intersection": true},
                    "connection": {"to": 2, "direction": "east", "length": 10, "is_official": true, "is_rail": true}
                },
                {
                    "station": {"id": 2, "code_name": "b", "full_name": "B", "x": 10, "y": 5,
                                "is_visible": true, "is_safe": true, "is_portal": false, "is_intersection": false}
                }
            ]
        }"#;

        let response: PathResponse = serde_json::from_str(json).unwrap();
        let PathResponse::Success(payload) = response else {
            panic!("expected success");
        };
        assert_eq!(payload.travel_time, 42);
        assert_eq!(payload.path.len(), 2);
        assert_eq!(
            payload.path[0].connection.as_ref().map(|c| c.direction),
            Some(Direction::East)
        );
        assert!(payload.path[1].connection.is_none());
    }

    #[test]
    fn parse_failure() {
        let response: PathResponse =
            serde_json::from_str(r#"{"result": "failure", "reason": "no path"}"#).unwrap();
        assert_eq!(
            response,
            PathResponse::Failure {
                reason: Some("no path".into())
            }
        );

        let response: PathResponse = serde_json::from_str(r#"{"result": "failure"}"#).unwrap();
        assert_eq!(response, PathResponse::Failure { reason: None });
    }

    #[test]
    fn missing_result_tag_is_rejected() {
        assert!(serde_json::from_str::<PathResponse>(r#"{"begin": "a"}"#).is_err());
    }

    #[test]
    fn missing_field_is_rejected() {
        let json = r#"{"result": "success", "begin": "a", "end": "b", "time": 1, "path": []}"#;
        assert!(serde_json::from_str::<PathResponse>(json).is_err());
    }

    #[test]
    fn parse_stations() {
        let json = r#"{"result": "success", "stations": [
            {"id": 1, "code_name": "spawn", "full_name": "Spawn", "x": 0, "y": 0,
             "is_visible": true, "is_safe": true, "is_portal": true, "is_intersection": true}
        ]}"#;
        let StationsResponse::Success { stations } = serde_json::from_str(json).unwrap() else {
            panic!("expected success");
        };
        assert_eq!(stations[0].code_name, "spawn");
    }
}
