use crate::chart::NatalChart;
use crate::ephemeris::provider::{EphemerisProvider, NatalChartProvider};
use crate::ephemeris::types::{
    BirthData, Body, CelestialPosition, Observer, SignDuration, CORE_BODIES,
};
use crate::western::signs::{degree_in_sign, normalize_longitude, SIGN_SPAN};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, julday, revjul, set_ephe_path};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at {datetime}: {message}")]
    CalculationFailed {
        body: Body,
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("House calculation failed at {datetime}: {message}")]
    HouseCalculationFailed {
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("Ephemeris provider unavailable: {message}")]
    Unavailable { message: String },
}

// Swiss Ephemeris body codes
const BODY_CODES: &[(Body, i32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Uranus, 7),
    (Body::Neptune, 8),
    (Body::Pluto, 9),
    (Body::NorthNode, 11), // TRUE_NODE
    (Body::Chiron, 15),
];

// FLG_SWIEPH | FLG_SPEED
const CALC_FLAGS: i32 = 2 | 256;

const WHOLE_SIGN_SYSTEM: u8 = b'W';

/// Below this daily motion a body is treated as stationary and gets no duration estimate
const STATIONARY_SPEED: f64 = 1e-6;

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        set_ephe_path(&path.to_string_lossy());
        log::debug!("Swiss Ephemeris data at {}", path.display());
        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }

    /// Transiting positions of the ten core bodies at one instant
    pub fn calc_transit_positions(
        &self,
        dt_utc: DateTime<Utc>,
    ) -> Result<Vec<CelestialPosition>, EphemerisError> {
        let jd = datetime_to_julian_day(dt_utc);
        CORE_BODIES
            .iter()
            .map(|body| self.calc_body_position(*body, jd))
            .collect()
    }

    /// Calculate position for a single body
    pub fn calc_body_position(
        &self,
        body: Body,
        jd: f64,
    ) -> Result<CelestialPosition, EphemerisError> {
        if body == Body::SouthNode {
            let north = self.calc_body_position(Body::NorthNode, jd)?;
            let mut south = CelestialPosition::new(Body::SouthNode, north.longitude + 180.0, north.retrograde);
            south.duration = north.duration;
            return Ok(south);
        }

        let body_code = BODY_CODES
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, code)| *code)
            .ok_or_else(|| EphemerisError::CalculationFailed {
                body,
                datetime: julian_day_to_datetime(jd),
                message: format!("No Swiss Ephemeris body code for {}", body),
            })?;

        let result = calc_ut(jd, body_code as u32, CALC_FLAGS as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                datetime: julian_day_to_datetime(jd),
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let longitude = normalize_longitude(result.out[0]);
        let speed_longitude = result.out[3];

        let mut position = CelestialPosition::new(body, longitude, speed_longitude < 0.0);
        position.duration = estimate_sign_duration(longitude, speed_longitude);
        Ok(position)
    }

    /// Ascendant and Midheaven for a birth instant and place
    pub fn calc_angles(
        &self,
        jd: f64,
        location: &Observer,
    ) -> Result<(f64, f64), EphemerisError> {
        use swisseph::swe::houses_ex;
        use swisseph::AscMc;

        let (_cusps, a) = houses_ex(
            jd,
            CALC_FLAGS,
            location.lat,
            location.lon,
            WHOLE_SIGN_SYSTEM as i32,
        );
        let ascmc = AscMc::from_array(a);

        let asc = ascmc.ascendant;
        let mc = ascmc.mc;
        if !asc.is_finite() || !mc.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                datetime: julian_day_to_datetime(jd),
                message: format!("non-finite angles for lat {} lon {}", location.lat, location.lon),
            });
        }

        Ok((normalize_longitude(asc), normalize_longitude(mc)))
    }
}

#[async_trait]
impl EphemerisProvider for SwissEphemerisAdapter {
    async fn positions(
        &self,
        instant: DateTime<Utc>,
        _observer: &Observer,
    ) -> Result<Vec<CelestialPosition>, EphemerisError> {
        // Geocentric longitudes do not depend on the observer
        self.calc_transit_positions(instant)
    }
}

#[async_trait]
impl NatalChartProvider for SwissEphemerisAdapter {
    async fn natal_chart(&self, birth: &BirthData) -> Result<NatalChart, EphemerisError> {
        let jd = datetime_to_julian_day(birth.instant);

        let mut positions = Vec::with_capacity(CORE_BODIES.len() + 5);
        for body in CORE_BODIES
            .iter()
            .chain([Body::NorthNode, Body::SouthNode, Body::Chiron].iter())
        {
            positions.push(self.calc_body_position(*body, jd)?);
        }

        if birth.time_known {
            let (asc, mc) = self.calc_angles(jd, &birth.location)?;
            positions.push(CelestialPosition::new(Body::Ascendant, asc, false));
            positions.push(CelestialPosition::new(Body::Midheaven, mc, false));
        } else {
            log::debug!("Birth time unknown, natal chart built without angles");
        }

        Ok(NatalChart::new(birth.instant, Some(birth.location.clone()), positions))
    }
}

/// Days in sign estimated from the current daily motion.
///
/// "Remaining" is measured in the direction of travel, so a retrograde body
/// counts down to the start of its current sign.
pub fn estimate_sign_duration(longitude: f64, speed_lon: f64) -> Option<SignDuration> {
    let speed = speed_lon.abs();
    if !speed.is_finite() || speed < STATIONARY_SPEED {
        return None;
    }
    let travelled = degree_in_sign(longitude);
    let left = if speed_lon >= 0.0 {
        SIGN_SPAN - travelled
    } else {
        travelled
    };
    Some(SignDuration {
        total_days: SIGN_SPAN / speed,
        remaining_days: left / speed,
    })
}

/// Convert UTC datetime to Julian Day
fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal =
        dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;

    // GREG_CAL = 1
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, 1)
}

/// Convert Julian Day to UTC datetime, for error reporting
fn julian_day_to_datetime(jd: f64) -> DateTime<Utc> {
    let (year, month, day, hour_decimal) = revjul(jd, 1);
    let hour = hour_decimal as u32;
    let minute = ((hour_decimal - hour as f64) * 60.0) as u32;
    let second = (((hour_decimal - hour as f64) * 60.0 - minute as f64) * 60.0) as u32;
    Utc.with_ymd_and_hms(year, month as u32, day as u32, hour, minute, second)
        .single()
        .unwrap_or_default()
}
