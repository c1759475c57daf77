//! Phrase banks for personal transit guidance.
//!
//! Everything here is fixed data; the same inputs always select the same text.

use crate::aspects::types::AspectKind;
use crate::ephemeris::types::{Body, CORE_BODIES};
use crate::transits::types::TransitKind;
use crate::western::houses::house_slot;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// (theme, opening of an actionable sentence) per core body
pub fn body_theme(body: Body) -> (&'static str, &'static str) {
    match body {
        Body::Sun => ("vitality and purpose", "Put your energy behind"),
        Body::Moon => ("feelings and needs", "Check in with how you feel about"),
        Body::Mercury => ("thinking and conversation", "Talk openly about"),
        Body::Venus => ("love, pleasure and values", "Bring warmth and care to"),
        Body::Mars => ("drive and courage", "Take one bold step in"),
        Body::Jupiter => ("growth and opportunity", "Say yes to growth in"),
        Body::Saturn => ("structure and commitment", "Build steady foundations in"),
        Body::Uranus => ("change and freedom", "Stay open to surprises in"),
        Body::Neptune => ("dreams and intuition", "Trust your intuition around"),
        Body::Pluto => ("transformation and power", "Release what no longer serves you in"),
        _ => ("this point", "Pay attention to"),
    }
}

/// What to focus on in each house, index 0 = 1st house
const HOUSE_FOCUS: [&str; 12] = [
    "how you present yourself",
    "your finances and what you value",
    "your conversations and daily errands",
    "your home and family life",
    "your creative projects and romance",
    "your routines and health habits",
    "your closest partnerships",
    "shared resources and deep bonds",
    "study, travel and the bigger picture",
    "your career and public goals",
    "your friendships and community",
    "rest, reflection and inner work",
];

/// (body, house) pairs with their own wording instead of the composed default
const HOUSE_OVERRIDES: &[(Body, u8, &str)] = &[
    (Body::Sun, 1, "This is your personal new year of sorts. Set one intention for who you want to become."),
    (Body::Sun, 10, "Step forward at work. Let the people who matter see what you have built."),
    (Body::Moon, 4, "Make your space feel like a refuge and give yourself an early night."),
    (Body::Mercury, 3, "Send the message you have been drafting in your head."),
    (Body::Venus, 5, "Plan something purely for joy, and invite someone you adore."),
    (Body::Venus, 7, "Tell a partner what you appreciate about them, specifically and out loud."),
    (Body::Mars, 6, "Channel restless energy into a workout or a stubborn task."),
    (Body::Jupiter, 9, "Enrol, book or apply. Horizons widen when you commit to learning."),
    (Body::Saturn, 2, "Review your budget and cut one expense that does not reflect your values."),
    (Body::Saturn, 7, "Clarify expectations in a key relationship and honour your commitments."),
    (Body::Pluto, 8, "Face a shared-money or intimacy issue honestly rather than avoiding it."),
];

lazy_static! {
    /// Guidance per (body, house), built once for the ten core bodies
    static ref HOUSE_GUIDANCE: HashMap<(Body, u8), String> = {
        let mut table = HashMap::with_capacity(CORE_BODIES.len() * 12);
        for body in CORE_BODIES {
            let (_, action) = body_theme(body);
            for (slot, focus) in HOUSE_FOCUS.iter().enumerate() {
                let house = slot as u8 + 1;
                table.insert((body, house), format!("{} {}.", action, focus));
            }
        }
        for (body, house, text) in HOUSE_OVERRIDES {
            table.insert((*body, *house), (*text).to_string());
        }
        table
    };
}

pub fn house_focus(house: u8) -> &'static str {
    HOUSE_FOCUS[house_slot(house)]
}

/// Guidance keyed by (body, house)
pub fn house_guidance(body: Body, house: u8) -> String {
    HOUSE_GUIDANCE
        .get(&(body, house))
        .cloned()
        .unwrap_or_else(|| {
            let (_, action) = body_theme(body);
            format!("{} {}.", action, house_focus(house))
        })
}

/// Advice appended when the transit also aspects a natal point
pub fn aspect_advice(kind: AspectKind) -> &'static str {
    match kind {
        AspectKind::Conjunction => "The energy is concentrated, so aim it deliberately.",
        AspectKind::Opposition => "Look for the middle ground between what you want and what others need.",
        AspectKind::Trine => "Things flow easily now; use the momentum instead of coasting.",
        AspectKind::Square => "Friction is pushing you to act. Choose one thing to change.",
        AspectKind::Sextile => "A small effort opens a real door. Reach out.",
    }
}

/// What a transiting body is doing, as a verb phrase
pub fn transit_verb(body: Body) -> &'static str {
    match body {
        Body::Sun => "is lighting up",
        Body::Moon => "is stirring",
        Body::Mercury => "is speaking to",
        Body::Venus => "is gently lifting",
        Body::Mars => "is pushing",
        Body::Jupiter => "is opening doors around",
        Body::Saturn => "is grounding",
        Body::Uranus => "is shaking up",
        Body::Neptune => "is softening",
        Body::Pluto => "is quietly reshaping",
        _ => "is influencing",
    }
}

/// The part of the person a natal point stands for
pub fn natal_theme(body: Body) -> String {
    let theme = match body {
        Body::Sun => "your sense of self",
        Body::Moon => "your emotions",
        Body::Mercury => "how you think and communicate",
        Body::Venus => "your relationships",
        Body::Mars => "your drive and ambition",
        Body::Jupiter => "your path to growth",
        Body::Saturn => "your sense of responsibility",
        Body::Uranus => "your need for freedom",
        Body::Neptune => "your inner world",
        Body::Pluto => "your personal power",
        Body::Ascendant => "how you show up in the world",
        Body::Midheaven => "your public life and career",
        other => return format!("your {} energy", other.name().to_lowercase()),
    };
    theme.to_string()
}

/// One sentence reading of a transit-to-natal aspect, e.g. "Mars is pushing your relationships."
pub fn aspect_interpretation(transiting: Body, natal: Body) -> String {
    format!("{} {} {}.", transiting, transit_verb(transiting), natal_theme(natal))
}

/// Guidance for a station, keyed by (body, kind)
pub fn station_guidance(body: Body, kind: TransitKind) -> String {
    let retrograde = matches!(kind, TransitKind::Retrograde);
    let text = match (body, retrograde) {
        (Body::Mercury, true) => "Double-check plans, messages and contracts before you commit.",
        (Body::Mercury, false) => "Stalled plans and conversations can move forward again.",
        (Body::Venus, true) => "Revisit what you truly value in love and money before making changes.",
        (Body::Venus, false) => "Relationship and money decisions feel clearer now.",
        (Body::Mars, true) => "Redirect effort inward and finish what you already started.",
        (Body::Mars, false) => "Your drive returns; restart the projects you paused.",
        (_, true) => "Slow down and review this area of life rather than forcing progress.",
        (_, false) => "Forward momentum returns; act on what the review period taught you.",
    };
    text.to_string()
}

/// Guidance for one personal impact, keyed by (body, house) or (body, event kind, aspect kind)
pub fn guidance_for(body: Body, kind: TransitKind, house: u8, aspect: Option<AspectKind>) -> String {
    match (kind, aspect) {
        (TransitKind::Retrograde | TransitKind::Direct, _) => {
            format!("{} Focus on {}.", station_guidance(body, kind), house_focus(house))
        }
        (_, Some(aspect_kind)) => {
            format!("{} {}", house_guidance(body, house), aspect_advice(aspect_kind))
        }
        (_, None) => house_guidance(body, house),
    }
}
