//! Coarse lunar phase detection.
//!
//! Phase is taken from whole days elapsed since a known new moon modulo the
//! mean synodic month. Good to about a day, which is all the phase messages need.

use crate::ephemeris::types::{Body, DailyPositions};
use crate::transits::types::{Significance, TransitEvent, TransitKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean synodic month in days
pub const SYNODIC_MONTH: f64 = 29.53;

/// Half-width of the band around each phase point, as a fraction of the cycle
pub const PHASE_TOLERANCE: f64 = 0.02;

/// A known new moon used as phase origin
pub fn reference_new_moon() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 11).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LunarPhase {
    NewMoon,
    FirstQuarter,
    FullMoon,
    LastQuarter,
}

impl LunarPhase {
    pub fn name(self) -> &'static str {
        match self {
            LunarPhase::NewMoon => "New Moon",
            LunarPhase::FirstQuarter => "First Quarter",
            LunarPhase::FullMoon => "Full Moon",
            LunarPhase::LastQuarter => "Last Quarter",
        }
    }

    pub fn significance(self) -> Significance {
        match self {
            LunarPhase::NewMoon | LunarPhase::FullMoon => Significance::High,
            LunarPhase::FirstQuarter | LunarPhase::LastQuarter => Significance::Medium,
        }
    }
}

impl fmt::Display for LunarPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position in the lunation on `date`, in [0, 1)
pub fn phase_fraction(date: NaiveDate) -> f64 {
    let days_since = (date - reference_new_moon()).num_days() as f64;
    days_since.rem_euclid(SYNODIC_MONTH) / SYNODIC_MONTH
}

/// The phase point `fraction` sits on, if it is inside a tolerance band
pub fn classify_phase(fraction: f64) -> Option<LunarPhase> {
    let near = |target: f64| (fraction - target).abs() < PHASE_TOLERANCE;
    if near(0.0) || near(1.0) {
        Some(LunarPhase::NewMoon)
    } else if near(0.25) {
        Some(LunarPhase::FirstQuarter)
    } else if near(0.5) {
        Some(LunarPhase::FullMoon)
    } else if near(0.75) {
        Some(LunarPhase::LastQuarter)
    } else {
        None
    }
}

/// At most one phase event for a sampled day
pub fn detect_lunar_phase(day: &DailyPositions) -> Option<TransitEvent> {
    let phase = classify_phase(phase_fraction(day.date))?;
    let label = match day.get(Body::Moon) {
        Some(moon) => format!("{} in {}", phase, moon.sign),
        None => phase.name().to_string(),
    };
    Some(TransitEvent {
        timestamp: day.timestamp,
        body: Body::Moon,
        label,
        significance: phase.significance(),
        kind: TransitKind::LunarPhase,
        duration: None,
    })
}
