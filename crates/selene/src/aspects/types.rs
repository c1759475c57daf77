use crate::ephemeris::types::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Major aspect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AspectKind {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
}

/// Every aspect kind, in the order they are tested
pub const ASPECT_KINDS: [AspectKind; 5] = [
    AspectKind::Conjunction,
    AspectKind::Opposition,
    AspectKind::Trine,
    AspectKind::Square,
    AspectKind::Sextile,
];

impl AspectKind {
    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Opposition => 180.0,
            AspectKind::Trine => 120.0,
            AspectKind::Square => 90.0,
            AspectKind::Sextile => 60.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Opposition => "opposition",
            AspectKind::Trine => "trine",
            AspectKind::Square => "square",
            AspectKind::Sextile => "sextile",
        }
    }

    /// Squares and oppositions are challenging, the rest flow
    pub fn is_harmonious(self) -> bool {
        !matches!(self, AspectKind::Square | AspectKind::Opposition)
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maximum orb in degrees per aspect type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbTable {
    pub conjunction: f64,
    pub opposition: f64,
    pub trine: f64,
    pub square: f64,
    pub sextile: f64,
}

impl Default for OrbTable {
    fn default() -> Self {
        Self {
            conjunction: 8.0,
            opposition: 8.0,
            trine: 8.0,
            square: 6.0,
            sextile: 6.0,
        }
    }
}

impl OrbTable {
    pub fn max_orb(&self, kind: AspectKind) -> f64 {
        match kind {
            AspectKind::Conjunction => self.conjunction,
            AspectKind::Opposition => self.opposition,
            AspectKind::Trine => self.trine,
            AspectKind::Square => self.square,
            AspectKind::Sextile => self.sextile,
        }
    }

    /// Widest orb in the table
    pub fn widest(&self) -> f64 {
        ASPECT_KINDS
            .iter()
            .map(|k| self.max_orb(*k))
            .fold(0.0, f64::max)
    }
}

/// Result of matching two longitudes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectMatch {
    pub kind: AspectKind,
    /// Deviation from the exact angle, in degrees
    pub orb: f64,
    /// max orb minus orb; larger means closer to exact
    pub intensity: f64,
}

/// How long a transit stays within orb of a natal point, from its daily motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectDuration {
    /// Days to cross the whole orb band
    pub total_days: f64,
    /// Days until the aspect leaves orb
    pub remaining_days: f64,
}

/// An aspect from a transiting body to a natal point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aspect {
    pub transiting: Body,
    pub natal: Body,
    pub kind: AspectKind,
    pub orb: f64,
    pub intensity: f64,
    /// Orb shrinking since the previous sample; unknown without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_applying: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<AspectDuration>,
}

/// An aspect between two bodies of the same sky
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkyAspect {
    pub first: Body,
    pub second: Body,
    pub kind: AspectKind,
    pub orb: f64,
    pub intensity: f64,
}

impl SkyAspect {
    /// "Jupiter conjunction Saturn"
    pub fn label(&self) -> String {
        format!("{} {} {}", self.first, self.kind, self.second)
    }
}

impl Aspect {
    pub fn is_harmonious(&self) -> bool {
        self.kind.is_harmonious()
    }

    /// Within 0.1 degrees of exact
    pub fn is_exact(&self) -> bool {
        self.orb < 0.1
    }
}
