//! Routing paths and their compaction.
//!
//! A `RoutingPath` is the station-by-station route returned by the routing
//! provider. Before display it is compacted into runs of steps sharing the
//! same direction and transport mode.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;

use super::{DomainError, RoutingPathCompactStep, RoutingPathStep, Station};

/// A complete route from origin to destination.
///
/// # Invariants
///
/// - Steps are only added before compaction
/// - `compact_path` is computed at most once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPath {
    first_station: Arc<Station>,
    last_station: Arc<Station>,
    /// Authoritative trip duration, computed by the provider.
    travel_time: Duration,
    /// How long the provider took to compute the path.
    compute_time: StdDuration,
    path: Vec<RoutingPathStep>,
    compact_path: Option<Vec<RoutingPathCompactStep>>,
    length: u64,
    stations_count: usize,
}

impl RoutingPath {
    /// Create an empty path; steps are appended with [`RoutingPath::add_step`].
    pub fn new(
        first_station: Arc<Station>,
        last_station: Arc<Station>,
        travel_time: Duration,
        compute_time: StdDuration,
    ) -> Self {
        Self {
            first_station,
            last_station,
            travel_time,
            compute_time,
            path: Vec::new(),
            compact_path: None,
            length: 0,
            stations_count: 0,
        }
    }

    /// Append the next raw step.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PathAlreadyCompacted`] once [`RoutingPath::compact`]
    /// has run.
    pub fn add_step(&mut self, step: RoutingPathStep) -> Result<(), DomainError> {
        if self.compact_path.is_some() {
            return Err(DomainError::PathAlreadyCompacted);
        }

        self.length += u64::from(step.length());
        if step.station().is_visible {
            self.stations_count += 1;
        }
        self.path.push(step);

        Ok(())
    }

    /// Merge consecutive steps into compact steps.
    ///
    /// A new run starts whenever the direction or the rail/footpath mode
    /// changes. The terminal step closes the last run without opening one.
    /// Running it again once the compact path exists does nothing.
    pub fn compact(&mut self) -> Result<(), DomainError> {
        if self.compact_path.is_some() {
            return Ok(());
        }

        let mut compact_path = Vec::new();
        let mut current: Option<RoutingPathCompactStep> = None;

        for step in &self.path {
            let starts_run = match &current {
                None => true,
                Some(run) => {
                    step.direction() != Some(run.direction()) || step.is_rail() != run.is_rail()
                }
            };

            if starts_run {
                if let Some(mut run) = current.take() {
                    run.finalize();
                    compact_path.push(run);
                }

                if let Some(hop) = step.as_hop() {
                    current = Some(RoutingPathCompactStep::new(
                        step.station().clone(),
                        hop.direction,
                        hop.is_rail,
                    ));
                }
            }

            if let Some(run) = current.as_mut() {
                run.add_step(step)?;
            }
        }

        if let Some(mut run) = current {
            run.finalize();
            compact_path.push(run);
        }

        tracing::trace!(
            from = %self.first_station.code,
            to = %self.last_station.code,
            steps = self.path.len(),
            compact_steps = compact_path.len(),
            "compacted path"
        );

        self.compact_path = Some(compact_path);
        Ok(())
    }

    pub fn first_station(&self) -> &Arc<Station> {
        &self.first_station
    }

    pub fn last_station(&self) -> &Arc<Station> {
        &self.last_station
    }

    pub fn travel_time(&self) -> Duration {
        self.travel_time
    }

    pub fn compute_time(&self) -> StdDuration {
        self.compute_time
    }

    /// Raw steps in travel order.
    pub fn path(&self) -> &[RoutingPathStep] {
        &self.path
    }

    /// Compact steps, once [`RoutingPath::compact`] has run.
    pub fn compact_path(&self) -> Option<&[RoutingPathCompactStep]> {
        self.compact_path.as_deref()
    }

    pub fn is_compacted(&self) -> bool {
        self.compact_path.is_some()
    }

    /// Total length in blocks.
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn steps_count(&self) -> usize {
        self.path.len()
    }

    /// Number of visible stations along the path.
    pub fn stations_count(&self) -> usize {
        self.stations_count
    }

    /// Number of compact steps; zero before compaction.
    pub fn compact_step_count(&self) -> usize {
        self.compact_path.as_ref().map_or(0, Vec::len)
    }

    /// Visible stations in travel order.
    pub fn visible_stations(&self) -> impl Iterator<Item = &Arc<Station>> {
        self.path
            .iter()
            .map(RoutingPathStep::station)
            .filter(|s| s.is_visible)
    }

    /// Whether any hop leaves the official network.
    pub fn has_unofficial_sections(&self) -> bool {
        self.path
            .iter()
            .any(|s| s.as_hop().is_some_and(|h| !h.is_official))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, Direction, Hop, StationId};

    fn station(id: u32, intersection: bool) -> Arc<Station> {
        Arc::new(
            Station::new(
                StationId(id),
                format!("s{id}"),
                format!("Station {id}"),
                Coordinates::new(id as i32 * 10, 0),
            )
            .with_intersection(intersection),
        )
    }

    /// Build a path from hops `(station, direction, length, is_rail)`,
    /// ending with a terminal step at `last`.
    fn build(hops: &[(Arc<Station>, Direction, u32, bool)], last: Arc<Station>) -> RoutingPath {
        let first = hops.first().map(|h| h.0.clone()).unwrap_or_else(|| last.clone());
        let mut path = RoutingPath::new(
            first,
            last.clone(),
            Duration::seconds(300),
            StdDuration::from_millis(4),
        );

        for (i, (from, direction, length, is_rail)) in hops.iter().enumerate() {
            let next = hops.get(i + 1).map(|h| h.0.clone()).unwrap_or_else(|| last.clone());
            path.add_step(RoutingPathStep::hop(
                from.clone(),
                Hop {
                    next_station: next,
                    direction: *direction,
                    length: *length,
                    is_official: true,
                    is_rail: *is_rail,
                },
            ))
            .unwrap();
        }
        path.add_step(RoutingPathStep::terminal(last)).unwrap();
        path
    }

    #[test]
    fn counters_follow_added_steps() {
        let a = station(1, true);
        let hidden = Arc::new(
            Station::new(StationId(2), "s2", "Hidden", Coordinates::new(0, 0)).with_visible(false),
        );
        let c = station(3, true);

        let path = build(
            &[
                (a, Direction::East, 100, true),
                (hidden, Direction::East, 40, true),
            ],
            c,
        );

        assert_eq!(path.length(), 140);
        assert_eq!(path.steps_count(), 3);
        assert_eq!(path.stations_count(), 2);
        assert_eq!(path.compact_step_count(), 0);
        assert!(path.compact_path().is_none());
        let names: Vec<_> = path.visible_stations().map(|s| s.code.as_str()).collect();
        assert_eq!(names, vec!["s1", "s3"]);
    }

    #[test]
    fn empty_path_compacts_to_nothing() {
        let a = station(1, true);
        let mut path = RoutingPath::new(
            a.clone(),
            a,
            Duration::zero(),
            StdDuration::from_millis(0),
        );

        path.compact().unwrap();
        assert_eq!(path.compact_path(), Some(&[][..]));
        assert_eq!(path.compact_step_count(), 0);
    }

    #[test]
    fn terminal_only_path_compacts_to_nothing() {
        let a = station(1, true);
        let mut path = build(&[], a);

        path.compact().unwrap();
        assert_eq!(path.steps_count(), 1);
        assert_eq!(path.compact_step_count(), 0);
    }

    #[test]
    fn direction_change_starts_a_new_run() {
        let a = station(1, true);
        let b = station(2, true);
        let c = station(3, true);
        let d = station(4, true);

        let mut path = build(
            &[
                (a, Direction::East, 100, true),
                (b, Direction::East, 200, true),
                (c, Direction::North, 50, true),
            ],
            d,
        );
        path.compact().unwrap();

        let runs = path.compact_path().unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].direction(), Direction::East);
        assert_eq!(runs[0].length(), 300);
        assert_eq!(runs[0].station_from().id, StationId(1));
        assert_eq!(runs[0].station_to().map(|s| s.id), Some(StationId(2)));
        assert_eq!(runs[1].direction(), Direction::North);
        assert_eq!(runs[1].length(), 50);
        assert_eq!(runs[1].station_from().id, StationId(3));
        assert!(runs.iter().all(|r| r.is_finalized()));
    }

    #[test]
    fn rail_and_footpath_are_never_merged() {
        let a = station(1, true);
        let b = station(2, true);
        let c = station(3, true);

        let mut path = build(
            &[
                (a, Direction::South, 100, true),
                (b, Direction::South, 30, false),
            ],
            c,
        );
        path.compact().unwrap();

        let runs = path.compact_path().unwrap();
        assert_eq!(runs.len(), 2);
        assert!(runs[0].is_rail());
        assert!(!runs[1].is_rail());
    }

    #[test]
    fn non_intersection_in_the_middle_is_folded() {
        let a = station(1, true);
        let b = station(2, false);
        let c = station(3, true);
        let d = station(4, true);

        let mut path = build(
            &[
                (a, Direction::West, 10, true),
                (b.clone(), Direction::West, 20, true),
                (c, Direction::West, 30, true),
            ],
            d,
        );
        path.compact().unwrap();

        let runs = path.compact_path().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].length(), 60);
        assert_eq!(runs[0].no_stop_steps_count(), 1);
        assert!(runs[0].steps().iter().all(|s| s.station().id != b.id));
        assert_eq!(runs[0].steps().len(), 2);
    }

    #[test]
    fn compact_twice_is_a_no_op() {
        let a = station(1, true);
        let b = station(2, true);

        let mut path = build(&[(a, Direction::East, 10, true)], b);
        path.compact().unwrap();
        let first = path.compact_path().unwrap().to_vec();
        path.compact().unwrap();

        assert_eq!(path.compact_path().unwrap(), &first[..]);
    }

    #[test]
    fn steps_cannot_be_added_after_compaction() {
        let a = station(1, true);
        let mut path = build(&[], a.clone());
        path.compact().unwrap();

        assert_eq!(
            path.add_step(RoutingPathStep::terminal(a)),
            Err(DomainError::PathAlreadyCompacted)
        );
    }

    #[test]
    fn unofficial_sections_are_reported() {
        let a = station(1, true);
        let b = station(2, true);
        let mut path = RoutingPath::new(
            a.clone(),
            b.clone(),
            Duration::seconds(10),
            StdDuration::from_millis(1),
        );
        path.add_step(RoutingPathStep::hop(
            a,
            Hop {
                next_station: b.clone(),
                direction: Direction::North,
                length: 5,
                is_official: false,
                is_rail: true,
            },
        ))
        .unwrap();
        path.add_step(RoutingPathStep::terminal(b)).unwrap();

        assert!(path.has_unofficial_sections());
    }
}
