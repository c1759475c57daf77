//! Sign ingress detection between two consecutive sampled days.

use crate::ephemeris::types::{CelestialPosition, DailyPositions};
use crate::transits::types::{ingress_significance, TransitEvent, TransitKind};
use chrono::{DateTime, Duration, Utc};

/// Ingress events for every core body whose sign differs between `prior` and `current`
pub fn detect_sign_changes(prior: &DailyPositions, current: &DailyPositions) -> Vec<TransitEvent> {
    current
        .positions
        .iter()
        .filter(|p| p.body.is_core())
        .filter_map(|today| {
            let yesterday = prior.get(today.body)?;
            if yesterday.sign == today.sign {
                return None;
            }
            let timestamp = crossing_instant(yesterday, prior.timestamp, current.timestamp);
            Some(TransitEvent {
                timestamp,
                body: today.body,
                label: format!("{} enters {}", today.body, today.sign),
                significance: ingress_significance(today.body),
                kind: TransitKind::SignChange,
                duration: today.duration,
            })
        })
        .collect()
}

/// When the body left its prior sign.
///
/// Uses the prior sample's remaining-days metadata, rounded to the minute.
/// Without it, or when the estimate lands past the current sample, the
/// detection sample is used.
pub fn crossing_instant(
    prior: &CelestialPosition,
    prior_timestamp: DateTime<Utc>,
    detected_at: DateTime<Utc>,
) -> DateTime<Utc> {
    let Some(duration) = prior.duration else {
        return detected_at;
    };
    if !duration.remaining_days.is_finite() || duration.remaining_days < 0.0 {
        return detected_at;
    }

    let minutes = (duration.remaining_days * 24.0 * 60.0).round() as i64;
    let crossing = prior_timestamp + Duration::minutes(minutes);
    if crossing > detected_at {
        detected_at
    } else {
        crossing
    }
}
