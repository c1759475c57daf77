use crate::aspects::types::{Aspect, AspectDuration, AspectMatch, OrbTable, SkyAspect, ASPECT_KINDS};
use crate::chart::NatalChart;
use crate::ephemeris::types::{CelestialPosition, DailyPositions};
use crate::western::signs::normalize_longitude;
use std::cmp::Ordering;

/// Default cap for ranked aspect lists
pub const DEFAULT_ASPECT_CAP: usize = 8;

/// Slack on the orb limit so separations sitting exactly on it survive float error
pub const ORB_EPSILON: f64 = 1e-9;

/// Below this daily motion no in-orb duration is estimated
const STATIONARY_MOTION: f64 = 1e-6;

/// Angle between two longitudes folded into [0, 180]
pub fn angular_separation(lon_a: f64, lon_b: f64) -> f64 {
    let raw_diff = (normalize_longitude(lon_a) - normalize_longitude(lon_b)).abs();
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// Shortest signed arc from `from` to `to`, in [-180, 180)
pub fn signed_motion(from: f64, to: f64) -> f64 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

/// Ranking used everywhere: tighter orb first, then higher intensity
fn rank(a_orb: f64, a_intensity: f64, b_orb: f64, b_intensity: f64) -> Ordering {
    a_orb
        .total_cmp(&b_orb)
        .then_with(|| b_intensity.total_cmp(&a_intensity))
}

/// Aspect calculator
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    orbs: OrbTable,
}

impl AspectCalculator {
    pub fn new(orbs: OrbTable) -> Self {
        Self { orbs }
    }

    pub fn orbs(&self) -> &OrbTable {
        &self.orbs
    }

    /// Closest aspect between two longitudes, if any is within orb.
    ///
    /// When the separation falls inside more than one aspect's orb the
    /// tightest one wins.
    pub fn match_aspect(&self, lon_a: f64, lon_b: f64) -> Option<AspectMatch> {
        let angle_diff = angular_separation(lon_a, lon_b);

        let mut best: Option<AspectMatch> = None;
        for kind in ASPECT_KINDS {
            let max_orb = self.orbs.max_orb(kind);
            let orb = (angle_diff - kind.angle()).abs();
            if orb > max_orb + ORB_EPSILON {
                continue;
            }
            let candidate = AspectMatch {
                kind,
                orb,
                intensity: (max_orb - orb).max(0.0),
            };
            let better = match &best {
                None => true,
                Some(current) => {
                    rank(candidate.orb, candidate.intensity, current.orb, current.intensity)
                        == Ordering::Less
                }
            };
            if better {
                best = Some(candidate);
            }
        }
        best
    }

    /// Every aspect from one transiting position to the chart's core bodies
    /// and angles, tightest first, at most `cap` entries
    pub fn all_aspects(
        &self,
        transit: &CelestialPosition,
        chart: &NatalChart,
        cap: usize,
    ) -> Vec<Aspect> {
        let mut aspects: Vec<Aspect> = chart
            .aspect_points()
            .filter_map(|natal| {
                self.match_aspect(transit.longitude, natal.longitude)
                    .map(|m| Aspect {
                        transiting: transit.body,
                        natal: natal.body,
                        kind: m.kind,
                        orb: m.orb,
                        intensity: m.intensity,
                        is_applying: None,
                        duration: None,
                    })
            })
            .collect();

        // stable: equal rank keeps chart order
        aspects.sort_by(|a, b| rank(a.orb, a.intensity, b.orb, b.intensity));
        aspects.truncate(cap);
        aspects
    }

    /// The single tightest aspect from a transiting position to the chart
    pub fn best_aspect(&self, transit: &CelestialPosition, chart: &NatalChart) -> Option<Aspect> {
        self.all_aspects(transit, chart, 1).into_iter().next()
    }

    /// Fill in applying/separating and time in orb from the body's position on the previous sample
    pub fn with_motion(
        &self,
        mut aspect: Aspect,
        today: &CelestialPosition,
        prior: &CelestialPosition,
        natal_longitude: f64,
    ) -> Aspect {
        let prior_orb = (angular_separation(prior.longitude, natal_longitude) - aspect.kind.angle()).abs();
        let applying = prior_orb > aspect.orb;
        aspect.is_applying = Some(applying);

        let speed = signed_motion(prior.longitude, today.longitude).abs();
        if speed.is_finite() && speed >= STATIONARY_MOTION {
            let max_orb = self.orbs.max_orb(aspect.kind);
            let remaining = if applying {
                (aspect.orb + max_orb) / speed
            } else {
                (max_orb - aspect.orb).max(0.0) / speed
            };
            aspect.duration = Some(AspectDuration {
                total_days: 2.0 * max_orb / speed,
                remaining_days: remaining,
            });
        }
        aspect
    }

    /// Aspects from every core transiting body of one day to the chart, ranked.
    ///
    /// With the previous day's sample each aspect also carries its motion.
    pub fn todays_aspects(
        &self,
        day: &DailyPositions,
        prior: Option<&DailyPositions>,
        chart: &NatalChart,
        cap: usize,
    ) -> Vec<Aspect> {
        let mut aspects: Vec<Aspect> = Vec::new();
        for transit in day.positions.iter().filter(|p| p.body.is_core()) {
            let before = prior.and_then(|d| d.get(transit.body));
            for aspect in self.all_aspects(transit, chart, usize::MAX) {
                let natal = chart.get(aspect.natal);
                aspects.push(match (before, natal) {
                    (Some(before), Some(natal)) => {
                        self.with_motion(aspect, transit, before, natal.longitude)
                    }
                    _ => aspect,
                });
            }
        }

        aspects.sort_by(|a, b| rank(a.orb, a.intensity, b.orb, b.intensity));
        aspects.truncate(cap);
        aspects
    }

    /// Aspects between the core bodies of one day, each pair once, ranked
    pub fn sky_aspects(&self, day: &DailyPositions) -> Vec<SkyAspect> {
        let bodies: Vec<&CelestialPosition> =
            day.positions.iter().filter(|p| p.body.is_core()).collect();

        let mut aspects = Vec::new();
        for (i, first) in bodies.iter().enumerate() {
            for second in &bodies[i + 1..] {
                if let Some(m) = self.match_aspect(first.longitude, second.longitude) {
                    aspects.push(SkyAspect {
                        first: first.body,
                        second: second.body,
                        kind: m.kind,
                        orb: m.orb,
                        intensity: m.intensity,
                    });
                }
            }
        }

        aspects.sort_by(|a, b| rank(a.orb, a.intensity, b.orb, b.intensity));
        aspects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::types::AspectKind;

    #[test]
    fn test_separation_folds_across_zero() {
        assert!((angular_separation(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((angular_separation(10.0, 350.0) - 20.0).abs() < 1e-9);
        assert_eq!(angular_separation(0.0, 180.0), 180.0);
    }

    #[test]
    fn test_overlapping_orbs_pick_tightest() {
        // Wide enough orbs that 75° sits inside both sextile and square
        let calc = AspectCalculator::new(OrbTable {
            conjunction: 8.0,
            opposition: 8.0,
            trine: 8.0,
            square: 20.0,
            sextile: 20.0,
        });
        let m = calc.match_aspect(0.0, 72.0).unwrap();
        assert_eq!(m.kind, AspectKind::Sextile);
        assert!((m.orb - 12.0).abs() < 1e-9);

        let m = calc.match_aspect(0.0, 80.0).unwrap();
        assert_eq!(m.kind, AspectKind::Square);
    }

    #[test]
    fn test_signed_motion_wraps() {
        assert!((signed_motion(359.5, 0.5) - 1.0).abs() < 1e-9);
        assert!((signed_motion(0.5, 359.5) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_aspect_between_orbs() {
        let calc = AspectCalculator::default();
        assert!(calc.match_aspect(0.0, 30.0).is_none());
        assert!(calc.match_aspect(0.0, 150.0).is_none());
    }
}
