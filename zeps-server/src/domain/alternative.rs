//! Alternative routes offered next to the displayed one.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;

use super::{RoutingPath, format_duration_fr};

/// Which strategy the alternative route represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlternativeKind {
    /// The literal path from origin to destination.
    Direct,
    /// The path from the spawn hub.
    Spawn,
}

impl AlternativeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlternativeKind::Direct => "direct",
            AlternativeKind::Spawn => "spawn",
        }
    }
}

impl fmt::Display for AlternativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A displayed ("master") route paired with a route the user may prefer.
#[derive(Debug, Clone)]
pub struct AlternativeRoutingPath {
    name: AlternativeKind,
    master: Arc<RoutingPath>,
    alternative: Arc<RoutingPath>,
    /// The path originally searched for (origin to destination).
    searched: Arc<RoutingPath>,
}

impl AlternativeRoutingPath {
    pub fn new(
        name: AlternativeKind,
        master: Arc<RoutingPath>,
        alternative: Arc<RoutingPath>,
        searched: Arc<RoutingPath>,
    ) -> Self {
        Self {
            name,
            master,
            alternative,
            searched,
        }
    }

    pub fn name(&self) -> AlternativeKind {
        self.name
    }

    pub fn master(&self) -> &Arc<RoutingPath> {
        &self.master
    }

    pub fn alternative(&self) -> &Arc<RoutingPath> {
        &self.alternative
    }

    pub fn searched(&self) -> &Arc<RoutingPath> {
        &self.searched
    }

    /// Alternative travel time minus master travel time.
    pub fn length_diff(&self) -> Duration {
        self.alternative.travel_time() - self.master.travel_time()
    }

    /// The difference in words, e.g. `2 minutes et 15 secondes de plus`.
    pub fn time_diff_label(&self) -> String {
        let diff = self.length_diff();
        if diff == Duration::zero() {
            "le même temps".to_string()
        } else if diff > Duration::zero() {
            format!("{} de plus", format_duration_fr(diff))
        } else {
            format!("{} de moins", format_duration_fr(diff))
        }
    }
}
