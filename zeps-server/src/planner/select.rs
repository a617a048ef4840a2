//! Choice between the direct route and routes starting from a hub.
//!
//! Players can teleport to a hub (the spawn) for free, so a route starting
//! there may beat the literal shortest path. The faster route is shown,
//! and the other one is offered as an alternative.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::{AlternativeKind, AlternativeRoutingPath, DomainError, RoutingPath};

/// A path from a hub station to the destination.
#[derive(Debug, Clone)]
pub struct HubCandidate {
    /// Code of the hub station.
    pub hub: String,
    pub path: RoutingPath,
}

impl HubCandidate {
    pub fn new(hub: impl Into<String>, path: RoutingPath) -> Self {
        Self {
            hub: hub.into(),
            path,
        }
    }
}

/// Index of the candidate to prefer over the direct route, if any.
///
/// A candidate qualifies when it beats the direct route by more than
/// `threshold` and is faster than the best candidate seen so far. Every
/// candidate is scanned; on equal times the earlier one stays.
pub fn select_shortest(
    direct: &RoutingPath,
    candidates: &[HubCandidate],
    threshold: Duration,
) -> Option<usize> {
    // No representable limit means no hub can beat it.
    let limit = direct.travel_time().checked_sub(&threshold)?;
    let mut best: Option<(usize, Duration)> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let time = candidate.path.travel_time();
        let best_time = best.map_or(direct.travel_time(), |(_, t)| t);

        if time < limit && time < best_time {
            best = Some((index, time));
        }
    }

    best.map(|(index, _)| index)
}

/// The route to display, with the alternative offered next to it.
#[derive(Debug, Clone)]
pub struct RouteChoice {
    route: Arc<RoutingPath>,
    alternative: Option<AlternativeRoutingPath>,
    via_hub: Option<String>,
}

impl RouteChoice {
    /// Compare the direct route with hub candidates and package the result.
    ///
    /// When a hub route wins it becomes the displayed route and the direct
    /// one is offered as the `direct` alternative. With `force_direct` the
    /// direct route stays displayed and the hub route is offered as the
    /// `spawn` alternative. The displayed paths come back compacted.
    pub fn build(
        mut direct: RoutingPath,
        mut candidates: Vec<HubCandidate>,
        threshold: Duration,
        force_direct: bool,
    ) -> Result<Self, DomainError> {
        direct.compact()?;

        let Some(index) = select_shortest(&direct, &candidates, threshold) else {
            return Ok(Self {
                route: Arc::new(direct),
                alternative: None,
                via_hub: None,
            });
        };

        let HubCandidate { hub, path: mut hub_path } = candidates.swap_remove(index);
        hub_path.compact()?;

        tracing::debug!(
            hub = %hub,
            direct_secs = direct.travel_time().num_seconds(),
            hub_secs = hub_path.travel_time().num_seconds(),
            force_direct,
            "hub route beats direct route"
        );

        let direct = Arc::new(direct);
        let hub_path = Arc::new(hub_path);

        if force_direct {
            Ok(Self {
                route: direct.clone(),
                alternative: Some(AlternativeRoutingPath::new(
                    AlternativeKind::Spawn,
                    direct.clone(),
                    hub_path,
                    direct,
                )),
                via_hub: None,
            })
        } else {
            Ok(Self {
                route: hub_path.clone(),
                alternative: Some(AlternativeRoutingPath::new(
                    AlternativeKind::Direct,
                    hub_path,
                    direct.clone(),
                    direct,
                )),
                via_hub: Some(hub),
            })
        }
    }

    /// The route to display.
    pub fn route(&self) -> &Arc<RoutingPath> {
        &self.route
    }

    pub fn alternative(&self) -> Option<&AlternativeRoutingPath> {
        self.alternative.as_ref()
    }

    /// Hub the displayed route starts from, when it does.
    pub fn via_hub(&self) -> Option<&str> {
        self.via_hub.as_deref()
    }

    /// Whether the traveller should first teleport to a hub.
    pub fn is_through_spawn(&self) -> bool {
        self.via_hub.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, Direction, Hop, RoutingPathStep, Station, StationId};
    use std::time::Duration as StdDuration;

    fn station(id: u32, code: &str) -> Arc<Station> {
        Arc::new(
            Station::new(StationId(id), code, code.to_uppercase(), Coordinates::new(0, 0))
                .with_intersection(true),
        )
    }

    fn path(from: &str, travel_secs: i64) -> RoutingPath {
        let start = station(1, from);
        let end = station(2, "dest");
        let mut path = RoutingPath::new(
            start.clone(),
            end.clone(),
            Duration::seconds(travel_secs),
            StdDuration::from_millis(1),
        );
        path.add_step(RoutingPathStep::hop(
            start,
            Hop {
                next_station: end.clone(),
                direction: Direction::East,
                length: 100,
                is_official: true,
                is_rail: true,
            },
        ))
        .unwrap();
        path.add_step(RoutingPathStep::terminal(end)).unwrap();
        path
    }

    fn threshold() -> Duration {
        Duration::seconds(60)
    }

    #[test]
    fn hub_beating_threshold_is_selected() {
        let direct = path("origin", 600);
        let candidates = vec![HubCandidate::new("spawn", path("spawn", 500))];

        assert_eq!(select_shortest(&direct, &candidates, threshold()), Some(0));
    }

    #[test]
    fn hub_within_threshold_is_ignored() {
        let direct = path("origin", 600);
        let candidates = vec![HubCandidate::new("spawn", path("spawn", 560))];

        assert_eq!(select_shortest(&direct, &candidates, threshold()), None);
    }

    #[test]
    fn exactly_threshold_is_not_enough() {
        let direct = path("origin", 600);
        let candidates = vec![HubCandidate::new("spawn", path("spawn", 540))];

        assert_eq!(select_shortest(&direct, &candidates, threshold()), None);
    }

    #[test]
    fn largest_threshold_keeps_direct() {
        let direct = path("origin", 600);
        let candidates = vec![HubCandidate::new("spawn", path("spawn", 0))];

        assert_eq!(select_shortest(&direct, &candidates, Duration::MAX), None);
        assert_eq!(select_shortest(&direct, &candidates, Duration::MIN), None);
    }

    #[test]
    fn later_better_hub_wins() {
        let direct = path("origin", 600);
        let candidates = vec![
            HubCandidate::new("spawn", path("spawn", 500)),
            HubCandidate::new("nether", path("nether", 300)),
        ];

        assert_eq!(select_shortest(&direct, &candidates, threshold()), Some(1));
    }

    #[test]
    fn earlier_hub_keeps_ties() {
        let direct = path("origin", 600);
        let candidates = vec![
            HubCandidate::new("spawn", path("spawn", 300)),
            HubCandidate::new("nether", path("nether", 300)),
            HubCandidate::new("ile", path("ile", 450)),
        ];

        assert_eq!(select_shortest(&direct, &candidates, threshold()), Some(0));
    }

    #[test]
    fn no_candidates_keeps_direct() {
        let choice = RouteChoice::build(path("origin", 600), vec![], threshold(), false).unwrap();

        assert_eq!(choice.route().first_station().code, "origin");
        assert!(choice.alternative().is_none());
        assert!(!choice.is_through_spawn());
        assert!(choice.route().is_compacted());
    }

    #[test]
    fn hub_route_displayed_with_direct_alternative() {
        let choice = RouteChoice::build(
            path("origin", 600),
            vec![HubCandidate::new("spawn", path("spawn", 500))],
            threshold(),
            false,
        )
        .unwrap();

        assert_eq!(choice.route().first_station().code, "spawn");
        assert_eq!(choice.via_hub(), Some("spawn"));
        assert!(choice.is_through_spawn());

        let alt = choice.alternative().unwrap();
        assert_eq!(alt.name(), AlternativeKind::Direct);
        assert_eq!(alt.master().first_station().code, "spawn");
        assert_eq!(alt.alternative().first_station().code, "origin");
        assert_eq!(alt.searched().first_station().code, "origin");
        assert_eq!(alt.length_diff(), Duration::seconds(100));
        assert_eq!(alt.time_diff_label(), "1 minute et 40 secondes de plus");
        assert!(alt.alternative().is_compacted());
    }

    #[test]
    fn forced_direct_offers_spawn_alternative() {
        let choice = RouteChoice::build(
            path("origin", 600),
            vec![HubCandidate::new("spawn", path("spawn", 500))],
            threshold(),
            true,
        )
        .unwrap();

        assert_eq!(choice.route().first_station().code, "origin");
        assert!(!choice.is_through_spawn());

        let alt = choice.alternative().unwrap();
        assert_eq!(alt.name(), AlternativeKind::Spawn);
        assert_eq!(alt.master().first_station().code, "origin");
        assert_eq!(alt.alternative().first_station().code, "spawn");
        assert_eq!(alt.length_diff(), Duration::seconds(-100));
        assert_eq!(alt.time_diff_label(), "1 minute et 40 secondes de moins");
    }

    #[test]
    fn forced_direct_without_better_hub_has_no_alternative() {
        let choice = RouteChoice::build(
            path("origin", 600),
            vec![HubCandidate::new("spawn", path("spawn", 590))],
            threshold(),
            true,
        )
        .unwrap();

        assert_eq!(choice.route().first_station().code, "origin");
        assert!(choice.alternative().is_none());
    }
}
