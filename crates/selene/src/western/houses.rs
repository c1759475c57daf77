//! Whole-sign houses.
//!
//! House 1 is the whole sign holding the Ascendant; each following sign is the
//! next house. Charts without a birth time fall back to the natal Sun as a
//! pseudo-ascendant (a "solar chart"), flagged as approximate.

use crate::chart::NatalChart;
use crate::western::signs::get_sign_index;
use serde::{Deserialize, Serialize};

/// (short meaning, life area) per house, index 0 = 1st house
pub const HOUSE_MEANINGS: [(&str, &str); 12] = [
    ("self and identity", "how you show up and begin things"),
    ("money and values", "income, possessions and self-worth"),
    ("communication", "conversations, learning and your neighbourhood"),
    ("home and family", "roots, family and private life"),
    ("creativity and romance", "play, pleasure, romance and children"),
    ("health and daily work", "routines, wellbeing and service"),
    ("partnerships", "committed relationships, contracts and close allies"),
    ("transformation and shared resources", "intimacy, debts and other people's money"),
    ("travel and beliefs", "study, long journeys and philosophy"),
    ("career and reputation", "ambition, public image and authority"),
    ("friends and community", "networks, groups and future hopes"),
    ("rest and the unconscious", "retreat, endings and hidden matters"),
];

/// House number (1-12) of `body_longitude` with `ascendant_longitude` on the first house
pub fn whole_sign_house(body_longitude: f64, ascendant_longitude: f64) -> u8 {
    let body_sign = get_sign_index(body_longitude);
    let asc_sign = get_sign_index(ascendant_longitude);
    (body_sign + 12 - asc_sign) % 12 + 1
}

/// Short meaning of a house, e.g. "partnerships" for the 7th
pub fn house_meaning(house: u8) -> &'static str {
    HOUSE_MEANINGS[house_slot(house)].0
}

/// Longer description of the life area a house covers
pub fn house_life_area(house: u8) -> &'static str {
    HOUSE_MEANINGS[house_slot(house)].1
}

/// Table index of a house number; houses run 1 through 12
pub(crate) fn house_slot(house: u8) -> usize {
    debug_assert!((1..=12).contains(&house), "house {house} is outside 1..=12");
    (house.clamp(1, 12) - 1) as usize
}

/// "1st", "2nd", "3rd", "7th", "11th" ...
pub fn ordinal(house: u8) -> String {
    let suffix = match (house % 10, house % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", house, suffix)
}

/// A resolved house, with a flag when it was derived from the Sun instead of the Ascendant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousePlacement {
    pub house: u8,
    pub is_approximate: bool,
}

/// The longitude used as house 1 for a chart, and whether it is the Sun stand-in
pub fn house_reference(chart: &NatalChart) -> Option<(f64, bool)> {
    if let Some(asc) = chart.ascendant() {
        return Some((asc.longitude, false));
    }
    chart.sun().map(|sun| (sun.longitude, true))
}

/// Whole-sign house of a longitude in a natal chart.
///
/// `None` when the chart has neither an Ascendant nor a Sun.
pub fn locate_house(longitude: f64, chart: &NatalChart) -> Option<HousePlacement> {
    let (reference, is_approximate) = house_reference(chart)?;
    Some(HousePlacement {
        house: whole_sign_house(longitude, reference),
        is_approximate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascendant_sign_is_first_house() {
        for asc in [0.0, 17.5, 95.0, 359.9] {
            assert_eq!(whole_sign_house(asc, asc), 1);
        }
    }

    #[test]
    fn test_house_wraps_past_pisces() {
        // Ascendant in Sagittarius, body in Aries
        assert_eq!(whole_sign_house(5.0, 250.0), 5);
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(7), "7th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
    }

    #[test]
    fn test_seventh_house_meaning() {
        assert_eq!(house_meaning(7), "partnerships");
    }

    #[test]
    fn test_house_slots_cover_one_through_twelve() {
        assert_eq!(house_slot(1), 0);
        assert_eq!(house_slot(12), 11);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside 1..=12")]
    fn test_house_zero_is_rejected() {
        house_meaning(0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside 1..=12")]
    fn test_house_thirteen_is_rejected() {
        house_life_area(13);
    }
}
