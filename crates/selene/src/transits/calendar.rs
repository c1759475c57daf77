//! Merging detector output into the canonical event stream.

use crate::ephemeris::cache::PositionWindow;
use crate::transits::lunar::detect_lunar_phase;
use crate::transits::retrograde::detect_stations;
use crate::transits::sign_change::detect_sign_changes;
use crate::transits::types::TransitEvent;
use std::collections::HashSet;

/// Sort ascending by timestamp and drop repeated (day, body, label) events,
/// keeping the first.
pub fn sort_and_dedup(mut events: Vec<TransitEvent>) -> Vec<TransitEvent> {
    // stable, so equal timestamps keep input order
    events.sort_by_key(|e| e.timestamp);

    let mut seen = HashSet::with_capacity(events.len());
    events.retain(|e| seen.insert(e.key()));
    events
}

/// Merge several event streams (e.g. overlapping windows) into one ordered, deduplicated stream
pub fn merge_event_streams<I>(streams: I) -> Vec<TransitEvent>
where
    I: IntoIterator<Item = Vec<TransitEvent>>,
{
    sort_and_dedup(streams.into_iter().flatten().collect())
}

/// Sign changes, stations and lunar phases for every day of the window
pub fn aggregate_window_events(window: &PositionWindow) -> Vec<TransitEvent> {
    let mut sign_changes = Vec::new();
    let mut stations = Vec::new();
    for (prior, current) in window.consecutive_pairs() {
        sign_changes.extend(detect_sign_changes(prior, current));
        stations.extend(detect_stations(prior, current));
    }

    let phases: Vec<TransitEvent> = window.days().filter_map(detect_lunar_phase).collect();

    log::debug!(
        "window from {}: {} sign changes, {} stations, {} lunar phases",
        window.start(),
        sign_changes.len(),
        stations.len(),
        phases.len()
    );

    merge_event_streams([sign_changes, phases, stations])
}
