use crate::aspects::calculator::AspectCalculator;
use crate::aspects::types::{Aspect, AspectKind};
use crate::chart::NatalChart;
use crate::ephemeris::cache::{sample_instant, PositionWindow};
use crate::impact::guidance::{aspect_interpretation, guidance_for};
use crate::transits::types::{TransitEvent, TransitKind};
use crate::western::houses::{house_meaning, locate_house, ordinal};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How one upcoming event touches a natal chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalTransitImpact {
    pub event: TransitEvent,
    /// Whole-sign house, 1-12
    pub house: u8,
    pub house_meaning: String,
    /// House counted from the natal Sun because no Ascendant was available
    pub is_approximate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect: Option<Aspect>,
    pub impact: String,
    pub guidance: String,
}

/// A transit-to-natal aspect with its one-line reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectNote {
    #[serde(flatten)]
    pub aspect: Aspect,
    pub interpretation: String,
}

pub fn annotate_aspects(aspects: Vec<Aspect>) -> Vec<AspectNote> {
    aspects
        .into_iter()
        .map(|aspect| AspectNote {
            interpretation: aspect_interpretation(aspect.transiting, aspect.natal),
            aspect,
        })
        .collect()
}

/// Personal impacts for `transits`, in input order, at most `limit` of them.
///
/// Events whose body has no sampled position in `window`, or charts with
/// neither Ascendant nor Sun, produce nothing.
pub fn synthesize_impacts(
    transits: &[TransitEvent],
    natal: &NatalChart,
    window: &PositionWindow,
    calculator: &AspectCalculator,
    limit: usize,
) -> Vec<PersonalTransitImpact> {
    let mut impacts = Vec::with_capacity(limit.min(transits.len()));

    for event in transits {
        if impacts.len() >= limit {
            break;
        }

        let sample_date = impact_sample_date(event);
        let Some(position) = window.position_of(sample_date, event.body) else {
            log::debug!("no position for {} on {}, skipping impact", event.body, sample_date);
            continue;
        };
        let Some(placement) = locate_house(position.longitude, natal) else {
            log::debug!("natal chart has no Ascendant or Sun, impacts unavailable");
            return impacts;
        };

        let aspect = calculator.best_aspect(position, natal);
        let meaning = house_meaning(placement.house);

        impacts.push(PersonalTransitImpact {
            event: event.clone(),
            house: placement.house,
            house_meaning: meaning.to_string(),
            is_approximate: placement.is_approximate,
            aspect,
            impact: impact_sentence(event, placement.house, aspect.as_ref()),
            guidance: guidance_for(
                event.body,
                event.kind,
                placement.house,
                aspect.map(|a| a.kind),
            ),
        });
    }

    impacts
}

/// The sampled day whose positions describe `event`.
///
/// An interpolated ingress lands between two samples; the body is only in its
/// new sign from the following sample on.
pub fn impact_sample_date(event: &TransitEvent) -> NaiveDate {
    let day = event.day();
    if event.kind == TransitKind::SignChange && event.timestamp != sample_instant(day) {
        return day.succ_opt().unwrap_or(day);
    }
    day
}

/// One deterministic sentence describing the event in personal terms
pub fn impact_sentence(event: &TransitEvent, house: u8, aspect: Option<&Aspect>) -> String {
    let house_phrase = format!("your {} house of {}", ordinal(house), house_meaning(house));
    let opening = match event.kind {
        TransitKind::SignChange => format!("{} and moves through {}", event.label, house_phrase),
        TransitKind::LunarPhase => format!("The {} lights up {}", event.label, house_phrase),
        TransitKind::Retrograde => format!("{} turns retrograde in {}", event.body, house_phrase),
        TransitKind::Direct => format!("{} turns direct in {}", event.body, house_phrase),
    };

    match aspect {
        Some(a) => format!(
            "{}, forming a {} {} your natal {}.",
            opening,
            a.kind,
            if a.kind == AspectKind::Conjunction { "with" } else { "to" },
            a.natal
        ),
        None => format!("{}.", opening),
    }
}
