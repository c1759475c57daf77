use crate::ephemeris::types::{Body, DailyPositions};
use crate::transits::types::{Significance, TransitEvent, TransitKind};

/// Retrograde stations of the personal planets are the ones people notice
pub fn station_significance(body: Body) -> Significance {
    match body {
        Body::Mercury | Body::Venus | Body::Mars => Significance::High,
        _ => Significance::Medium,
    }
}

/// Station events for bodies whose direction flipped between the two samples.
///
/// The station is dated to the day it was first observed.
pub fn detect_stations(prior: &DailyPositions, current: &DailyPositions) -> Vec<TransitEvent> {
    current
        .positions
        .iter()
        .filter(|p| p.body.can_retrograde())
        .filter_map(|today| {
            let yesterday = prior.get(today.body)?;
            let (kind, label) = match (yesterday.retrograde, today.retrograde) {
                (false, true) => (
                    TransitKind::Retrograde,
                    format!("{} stations retrograde in {}", today.body, today.sign),
                ),
                (true, false) => (
                    TransitKind::Direct,
                    format!("{} stations direct in {}", today.body, today.sign),
                ),
                _ => return None,
            };
            Some(TransitEvent {
                timestamp: current.timestamp,
                body: today.body,
                label,
                significance: station_significance(today.body),
                kind,
                duration: None,
            })
        })
        .collect()
}
