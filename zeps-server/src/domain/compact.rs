//! Compact steps: maximal runs of raw steps sharing direction and mode.
//!
//! The pages show "East for 3200 blocks via 2 intersections" rather than
//! every hop, so the number of rendered entries stays small however dense
//! the network is.

use std::sync::Arc;

use super::{Direction, DomainError, RoutingPathStep, Station};

/// Whether a run is still accepting steps.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RunState {
    Open,
    /// `station_to` is the station of the last stop-worthy step, if any.
    Finalized { station_to: Option<Arc<Station>> },
}

/// A run of consecutive raw steps merged for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPathCompactStep {
    station_from: Arc<Station>,
    direction: Direction,
    is_rail: bool,
    length: u64,
    /// Sub-steps standing at an intersection, rendered as intermediate stops.
    steps: Vec<RoutingPathStep>,
    no_stop_steps_count: usize,
    state: RunState,
}

impl RoutingPathCompactStep {
    /// Open a new run starting at `station_from`.
    pub fn new(station_from: Arc<Station>, direction: Direction, is_rail: bool) -> Self {
        Self {
            station_from,
            direction,
            is_rail,
            length: 0,
            steps: Vec::new(),
            no_stop_steps_count: 0,
            state: RunState::Open,
        }
    }

    /// Append a raw step to the run.
    ///
    /// Every step adds its length; only steps standing at an intersection are
    /// kept as visible stops, the others are just counted.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCompactionState`] if the step heads in
    /// another direction, and [`DomainError::RunFinalized`] once the run has
    /// been closed.
    pub fn add_step(&mut self, step: &RoutingPathStep) -> Result<(), DomainError> {
        if self.is_finalized() {
            return Err(DomainError::RunFinalized);
        }

        if let Some(direction) = step.direction()
            && direction != self.direction
        {
            return Err(DomainError::InvalidCompactionState {
                run: self.direction,
                step: direction,
            });
        }

        self.length += u64::from(step.length());

        if step.station().is_intersection {
            self.steps.push(step.clone());
        } else {
            self.no_stop_steps_count += 1;
        }

        Ok(())
    }

    /// Close the run. Calling it again is a no-op.
    pub fn finalize(&mut self) {
        if self.is_finalized() {
            return;
        }

        let station_to = self.steps.last().map(|s| s.station().clone());
        self.state = RunState::Finalized { station_to };
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.state, RunState::Finalized { .. })
    }

    pub fn station_from(&self) -> &Arc<Station> {
        &self.station_from
    }

    /// Station of the last intersection in the run.
    ///
    /// `None` while the run is open, or when it crossed no intersection.
    pub fn station_to(&self) -> Option<&Arc<Station>> {
        match &self.state {
            RunState::Open => None,
            RunState::Finalized { station_to } => station_to.as_ref(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_rail(&self) -> bool {
        self.is_rail
    }

    /// Cumulative length in blocks.
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn steps(&self) -> &[RoutingPathStep] {
        &self.steps
    }

    pub fn no_stop_steps_count(&self) -> usize {
        self.no_stop_steps_count
    }
}
