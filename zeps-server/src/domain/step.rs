//! Raw path steps, one per hop between adjacent stations.

use std::sync::Arc;

use super::{Direction, Station};

/// Edge metadata for a step that leads on to another station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub next_station: Arc<Station>,
    pub direction: Direction,
    /// Length of the edge in blocks.
    pub length: u32,
    /// Whether the edge belongs to the maintained network.
    pub is_official: bool,
    /// Rail edge, as opposed to a footpath.
    pub is_rail: bool,
}

/// What follows a step: another station, or nothing (end of path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepLink {
    Hop(Hop),
    Terminal,
}

/// One raw step of a routing path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPathStep {
    station: Arc<Station>,
    link: StepLink,
}

impl RoutingPathStep {
    /// A step leaving `station` towards `hop.next_station`.
    pub fn hop(station: Arc<Station>, hop: Hop) -> Self {
        Self {
            station,
            link: StepLink::Hop(hop),
        }
    }

    /// The final step of a path, standing at the destination.
    pub fn terminal(station: Arc<Station>) -> Self {
        Self {
            station,
            link: StepLink::Terminal,
        }
    }

    pub fn station(&self) -> &Arc<Station> {
        &self.station
    }

    pub fn link(&self) -> &StepLink {
        &self.link
    }

    pub fn as_hop(&self) -> Option<&Hop> {
        match &self.link {
            StepLink::Hop(hop) => Some(hop),
            StepLink::Terminal => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.link, StepLink::Terminal)
    }

    pub fn next_station(&self) -> Option<&Arc<Station>> {
        self.as_hop().map(|h| &h.next_station)
    }

    /// Direction of travel; `None` on the terminal step.
    pub fn direction(&self) -> Option<Direction> {
        self.as_hop().map(|h| h.direction)
    }

    /// Length in blocks; the terminal step covers no distance.
    pub fn length(&self) -> u32 {
        self.as_hop().map_or(0, |h| h.length)
    }

    pub fn is_official(&self) -> bool {
        self.as_hop().is_some_and(|h| h.is_official)
    }

    pub fn is_rail(&self) -> bool {
        self.as_hop().is_some_and(|h| h.is_rail)
    }
}
