use crate::western::signs::{normalize_longitude, ZodiacSign};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bodies and points the engine knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
    Chiron,
    Ascendant,
    Midheaven,
}

/// The ten core bodies, in traditional order
pub const CORE_BODIES: [Body; 10] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

impl Body {
    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::NorthNode => "North Node",
            Body::SouthNode => "South Node",
            Body::Chiron => "Chiron",
            Body::Ascendant => "Ascendant",
            Body::Midheaven => "Midheaven",
        }
    }

    pub fn is_core(self) -> bool {
        CORE_BODIES.contains(&self)
    }

    pub fn is_angle(self) -> bool {
        matches!(self, Body::Ascendant | Body::Midheaven)
    }

    /// Sun and Moon never station
    pub fn can_retrograde(self) -> bool {
        self.is_core() && !matches!(self, Body::Sun | Body::Moon)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geographic observer location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub lat: f64,
    pub lon: f64,
    /// Elevation in metres
    #[serde(default)]
    pub elevation: f64,
}

/// Hashable form of an observer, quantised to micro-degrees and millimetres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverKey {
    lat_micro: i64,
    lon_micro: i64,
    elevation_mm: i64,
}

impl Observer {
    pub fn new(lat: f64, lon: f64, elevation: f64) -> Self {
        Self { lat, lon, elevation }
    }

    /// Royal Observatory, Greenwich
    pub fn greenwich() -> Self {
        Self::new(51.4769, 0.0005, 0.0)
    }

    pub fn cache_key(&self) -> ObserverKey {
        ObserverKey {
            lat_micro: (self.lat * 1e6).round() as i64,
            lon_micro: (self.lon * 1e6).round() as i64,
            elevation_mm: (self.elevation * 1e3).round() as i64,
        }
    }
}

/// How long a body spends in its current sign
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignDuration {
    pub total_days: f64,
    pub remaining_days: f64,
}

/// A body's position at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialPosition {
    pub body: Body,
    /// Ecliptic longitude in [0, 360)
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub retrograde: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<SignDuration>,
}

impl CelestialPosition {
    pub fn new(body: Body, longitude: f64, retrograde: bool) -> Self {
        let longitude = normalize_longitude(longitude);
        Self {
            body,
            longitude,
            sign: ZodiacSign::from_longitude(longitude),
            retrograde,
            duration: None,
        }
    }

    pub fn with_duration(mut self, duration: SignDuration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// All positions sampled for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPositions {
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub positions: Vec<CelestialPosition>,
}

impl DailyPositions {
    pub fn get(&self, body: Body) -> Option<&CelestialPosition> {
        self.positions.iter().find(|p| p.body == body)
    }
}

/// Birth data handed to a natal chart provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthData {
    /// Birth instant; when the time of day is unknown this is noon UTC of the birth date
    pub instant: DateTime<Utc>,
    pub time_known: bool,
    pub location: Observer,
}
