//! Askama templates for the web frontend.

use askama::Template;
use reqwest::Url;

use crate::domain::{AlternativeKind, AlternativeRoutingPath, RoutingPath, format_duration_fr};
use crate::planner::RouteChoice;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

/// Route page.
#[derive(Template)]
#[template(path = "route.html")]
pub struct RouteTemplate {
    pub route: RouteView,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Route view model.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub from_name: String,
    pub to_name: String,
    /// Hub to teleport to before boarding, by display name.
    pub via_hub_name: Option<String>,
    pub travel_time: String,
    pub length: u64,
    pub stations_count: usize,
    pub has_unofficial_sections: bool,
    pub steps: Vec<CompactStepView>,
    pub alternative: Option<AlternativeView>,
}

impl RouteView {
    pub fn from_choice(choice: &RouteChoice) -> Self {
        let route = choice.route();

        Self {
            from_name: route.first_station().display_name.clone(),
            to_name: route.last_station().display_name.clone(),
            via_hub_name: choice
                .is_through_spawn()
                .then(|| route.first_station().display_name.clone()),
            travel_time: format_duration_fr(route.travel_time()),
            length: route.length(),
            stations_count: route.stations_count(),
            has_unofficial_sections: route.has_unofficial_sections(),
            steps: CompactStepView::from_path(route),
            alternative: choice.alternative().map(AlternativeView::from_alternative),
        }
    }
}

/// One line of the itinerary: "go East for 600 blocks".
#[derive(Debug, Clone)]
pub struct CompactStepView {
    pub from_name: String,
    /// Where the run ends: the start of the next one, or the destination.
    pub to_name: String,
    pub direction: String,
    pub is_rail: bool,
    pub length: u64,
    /// Intersections passed along the way.
    pub stops: Vec<String>,
    pub no_stop_count: usize,
}

impl CompactStepView {
    /// Build the itinerary lines of a compacted path.
    pub fn from_path(path: &RoutingPath) -> Vec<Self> {
        let runs = path.compact_path().unwrap_or_default();

        runs.iter()
            .enumerate()
            .map(|(i, run)| {
                let to = runs
                    .get(i + 1)
                    .map(|next| next.station_from())
                    .unwrap_or(path.last_station());

                let stops = run
                    .steps()
                    .iter()
                    .map(|s| s.station())
                    .filter(|s| s.id != run.station_from().id && s.id != to.id)
                    .map(|s| s.display_name.clone())
                    .collect();

                Self {
                    from_name: run.station_from().display_name.clone(),
                    to_name: to.display_name.clone(),
                    direction: run.direction().label_fr().to_string(),
                    is_rail: run.is_rail(),
                    length: run.length(),
                    stops,
                    no_stop_count: run.no_stop_steps_count(),
                }
            })
            .collect()
    }

    /// e.g. "via Village, Moulin"
    pub fn stops_summary(&self) -> String {
        if self.stops.is_empty() {
            String::new()
        } else {
            format!("via {}", self.stops.join(", "))
        }
    }
}

/// The other route, with a link to display it instead.
#[derive(Debug, Clone)]
pub struct AlternativeView {
    /// Sentence introducing the alternative.
    pub description: String,
    /// e.g. "1 minute et 40 secondes de plus"
    pub time_diff: String,
    pub link: String,
}

impl AlternativeView {
    pub fn from_alternative(alternative: &AlternativeRoutingPath) -> Self {
        let searched = alternative.searched();
        let from = &searched.first_station().code;
        let to = &searched.last_station().code;

        let (description, link) = match alternative.name() {
            AlternativeKind::Direct => (
                format!(
                    "Itinéraire direct depuis {}",
                    searched.first_station().display_name
                ),
                route_link(from, to, true),
            ),
            AlternativeKind::Spawn => (
                format!(
                    "Itinéraire en passant par {}",
                    alternative.alternative().first_station().display_name
                ),
                route_link(from, to, false),
            ),
        };

        Self {
            description,
            time_diff: alternative.time_diff_label(),
            link,
        }
    }
}

/// Link to the route page between two station codes, query escaped.
pub fn route_link(from: &str, to: &str, direct: bool) -> String {
    // Only the path and query of this URL end up in the link.
    let Ok(mut url) = Url::parse("http://zeps.invalid/route") else {
        return "/".to_string();
    };
    url.query_pairs_mut().append_pair("from", from).append_pair("to", to);
    if direct {
        url.query_pairs_mut().append_pair("direct", "1");
    }

    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}
