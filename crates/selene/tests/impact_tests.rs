mod common;

use chrono::{TimeZone, Utc};
use common::{chart, date, day, pos, with_remaining};
use selene::aspects::{AspectCalculator, AspectKind};
use selene::ephemeris::{Body, PositionWindow};
use selene::impact::{
    annotate_aspects, impact_sample_date, impact_sentence, synthesize_impacts,
};
use selene::transits::aggregate_window_events;
use selene::transits::{Significance, TransitEvent, TransitKind};

fn event(d: u32, body: Body, kind: TransitKind, label: &str) -> TransitEvent {
    TransitEvent {
        timestamp: Utc.with_ymd_and_hms(2025, 3, d, 0, 0, 0).unwrap(),
        body,
        label: label.to_string(),
        significance: Significance::Medium,
        kind,
        duration: None,
    }
}

fn window() -> PositionWindow {
    PositionWindow::from_days(
        date(2025, 3, 1),
        vec![
            day(date(2025, 2, 28), vec![pos(Body::Moon, 350.0), pos(Body::Mars, 183.0)]),
            day(date(2025, 3, 1), vec![pos(Body::Moon, 2.0), pos(Body::Mars, 183.5)]),
            day(date(2025, 3, 5), vec![pos(Body::Moon, 55.0), pos(Body::Mars, 185.0)]),
        ],
    )
}

fn events() -> Vec<TransitEvent> {
    vec![
        event(5, Body::Mars, TransitKind::SignChange, "Mars enters Libra"),
        event(1, Body::Moon, TransitKind::LunarPhase, "New Moon in Aries"),
    ]
}

#[test]
fn test_impacts_keep_input_order() {
    let natal = chart(vec![pos(Body::Sun, 95.0), pos(Body::Ascendant, 10.0)]);
    let impacts = synthesize_impacts(&events(), &natal, &window(), &AspectCalculator::default(), 10);

    assert_eq!(impacts.len(), 2);
    assert_eq!(impacts[0].event.body, Body::Mars);
    assert_eq!(impacts[1].event.body, Body::Moon);

    let mars = &impacts[0];
    assert_eq!(mars.house, 7);
    assert_eq!(mars.house_meaning, "partnerships");
    assert!(!mars.is_approximate);
    // 185 is an exact square to the natal Sun, tighter than the opposition to the Ascendant
    let aspect = mars.aspect.unwrap();
    assert_eq!(aspect.natal, Body::Sun);
    assert_eq!(aspect.kind, AspectKind::Square);
    assert_eq!(
        mars.impact,
        "Mars enters Libra and moves through your 7th house of partnerships, forming a square to your natal Sun."
    );
    assert!(mars.guidance.ends_with("Friction is pushing you to act. Choose one thing to change."));
}

#[test]
fn test_limit_caps_output() {
    let natal = chart(vec![pos(Body::Sun, 95.0), pos(Body::Ascendant, 10.0)]);
    let calc = AspectCalculator::default();

    let one = synthesize_impacts(&events(), &natal, &window(), &calc, 1);
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].event.body, Body::Mars);

    assert!(synthesize_impacts(&events(), &natal, &window(), &calc, 0).is_empty());
}

#[test]
fn test_sun_fallback_marks_impacts_approximate() {
    let natal = chart(vec![pos(Body::Sun, 95.0), pos(Body::Moon, 300.0)]);
    let impacts = synthesize_impacts(&events(), &natal, &window(), &AspectCalculator::default(), 10);

    assert_eq!(impacts.len(), 2);
    assert!(impacts.iter().all(|i| i.is_approximate));
    // Sun in Cancer is the 1st house, Libra the 4th
    assert_eq!(impacts[0].house, 4);
}

#[test]
fn test_chart_without_reference_point_yields_nothing() {
    let natal = chart(vec![pos(Body::Moon, 300.0)]);
    let impacts = synthesize_impacts(&events(), &natal, &window(), &AspectCalculator::default(), 10);
    assert!(impacts.is_empty());
}

#[test]
fn test_events_without_positions_are_skipped() {
    let natal = chart(vec![pos(Body::Sun, 95.0), pos(Body::Ascendant, 10.0)]);
    let mut transits = vec![event(3, Body::Jupiter, TransitKind::SignChange, "Jupiter enters Cancer")];
    transits.extend(events());

    let impacts = synthesize_impacts(&transits, &natal, &window(), &AspectCalculator::default(), 2);
    assert_eq!(impacts.len(), 2);
    assert!(impacts.iter().all(|i| i.event.body != Body::Jupiter));
}

#[test]
fn test_impacts_are_deterministic() {
    let natal = chart(vec![pos(Body::Sun, 95.0), pos(Body::Ascendant, 10.0)]);
    let calc = AspectCalculator::default();
    let first = synthesize_impacts(&events(), &natal, &window(), &calc, 10);
    let second = synthesize_impacts(&events(), &natal, &window(), &calc, 10);
    assert_eq!(first, second);
}

#[test]
fn test_station_and_phase_sentences() {
    let station = event(5, Body::Mercury, TransitKind::Retrograde, "Mercury stations retrograde in Aries");
    assert_eq!(
        impact_sentence(&station, 10, None),
        "Mercury turns retrograde in your 10th house of career and reputation."
    );

    let phase = event(1, Body::Moon, TransitKind::LunarPhase, "New Moon in Aries");
    assert!(impact_sentence(&phase, 1, None).starts_with("The New Moon in Aries lights up your 1st house"));
}

#[test]
fn test_impact_serializes_camel_case() {
    let natal = chart(vec![pos(Body::Sun, 95.0)]);
    let impacts = synthesize_impacts(&events(), &natal, &window(), &AspectCalculator::default(), 1);

    let json = serde_json::to_value(&impacts[0]).unwrap();
    assert_eq!(json["isApproximate"], true);
    assert_eq!(json["houseMeaning"], "home and family");
    assert_eq!(json["event"]["kind"], "sign_change");
    assert!(json.get("is_approximate").is_none());
}

#[test]
fn test_interpolated_ingress_uses_the_new_sign() {
    // The Sun leaves Pisces 72 minutes after the 19th is sampled
    let window = PositionWindow::from_days(
        date(2025, 3, 19),
        vec![
            day(date(2025, 3, 18), vec![with_remaining(pos(Body::Sun, 358.9), 1.05)]),
            day(date(2025, 3, 19), vec![with_remaining(pos(Body::Sun, 359.9), 0.05)]),
            day(date(2025, 3, 20), vec![with_remaining(pos(Body::Sun, 0.9), 29.0)]),
        ],
    );
    let natal = chart(vec![pos(Body::Ascendant, 10.0)]);

    let events = aggregate_window_events(&window);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].timestamp, Utc.with_ymd_and_hms(2025, 3, 19, 1, 12, 0).unwrap());
    assert_eq!(impact_sample_date(&events[0]), date(2025, 3, 20));

    let impacts = synthesize_impacts(&events, &natal, &window, &AspectCalculator::default(), 10);
    assert_eq!(impacts.len(), 1);
    assert_eq!(impacts[0].house, 1);
    assert!(impacts[0]
        .impact
        .starts_with("Sun enters Aries and moves through your 1st house of self and identity"));
}

#[test]
fn test_ingress_on_a_sample_uses_that_day() {
    let ingress = event(5, Body::Mars, TransitKind::SignChange, "Mars enters Libra");
    assert_eq!(impact_sample_date(&ingress), date(2025, 3, 5));

    let mut station = event(5, Body::Mercury, TransitKind::Retrograde, "Mercury stations retrograde in Aries");
    station.timestamp = Utc.with_ymd_and_hms(2025, 3, 5, 6, 0, 0).unwrap();
    assert_eq!(impact_sample_date(&station), date(2025, 3, 5));
}

#[test]
fn test_aspect_notes_read_transit_and_natal_point() {
    let natal = chart(vec![pos(Body::Venus, 100.0), pos(Body::Midheaven, 190.0)]);
    let calc = AspectCalculator::default();
    let aspects = calc.all_aspects(&pos(Body::Mars, 101.0), &natal, 8);

    let notes = annotate_aspects(aspects);
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].interpretation, "Mars is pushing your relationships.");
    assert_eq!(notes[1].interpretation, "Mars is pushing your public life and career.");

    let json = serde_json::to_value(&notes[0]).unwrap();
    assert_eq!(json["transiting"], "mars");
    assert_eq!(json["interpretation"], "Mars is pushing your relationships.");
}
