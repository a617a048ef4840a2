//! French rendering of durations for the route pages.

use chrono::Duration;

/// Format a duration as French words, e.g. `2 minutes et 15 secondes`.
///
/// The sign is ignored. Zero units are left out; a zero duration renders
/// as `0 seconde`.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use zeps_server::domain::format_duration_fr;
///
/// assert_eq!(format_duration_fr(Duration::seconds(135)), "2 minutes et 15 secondes");
/// assert_eq!(format_duration_fr(Duration::seconds(3661)), "1 heure, 1 minute et 1 seconde");
/// ```
pub fn format_duration_fr(duration: Duration) -> String {
    let total = duration.num_seconds().unsigned_abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let parts: Vec<String> = [(hours, "heure"), (minutes, "minute"), (seconds, "seconde")]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| unit_fr(n, unit))
        .collect();

    match parts.as_slice() {
        [] => unit_fr(0, "seconde"),
        [only] => only.clone(),
        [init @ .., last] => format!("{} et {}", init.join(", "), last),
    }
}

/// `n unit`, pluralised the French way (0 and 1 are singular).
fn unit_fr(n: u64, unit: &str) -> String {
    if n > 1 {
        format!("{n} {unit}s")
    } else {
        format!("{n} {unit}")
    }
}
