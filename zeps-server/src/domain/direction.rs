//! Cardinal directions of network edges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of travel along a rail or footpath edge.
///
/// The network is laid out on the world grid, so every edge runs along one
/// of the four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Lowercase identifier, as used by the routing provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    /// Label shown on the route pages.
    pub fn label_fr(&self) -> &'static str {
        match self {
            Direction::North => "Nord",
            Direction::South => "Sud",
            Direction::East => "Est",
            Direction::West => "Ouest",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_lowercase() {
        let d: Direction = serde_json::from_str("\"west\"").unwrap();
        assert_eq!(d, Direction::West);
        assert!(serde_json::from_str::<Direction>("\"West\"").is_err());
        assert!(serde_json::from_str::<Direction>("\"up\"").is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(Direction::North.to_string(), "north");
        assert_eq!(Direction::South.label_fr(), "Sud");
        assert_eq!(Direction::East.label_fr(), "Est");
        assert_eq!(Direction::West.label_fr(), "Ouest");
    }
}
