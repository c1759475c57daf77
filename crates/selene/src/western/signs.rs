//! Zodiac signs for Western astrology.
//!
//! The ecliptic is split into twelve contiguous 30° segments starting at the
//! vernal equinox (0° Aries).

use serde::{Deserialize, Serialize};
use std::fmt;

pub const SIGN_SPAN: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// Signs in zodiacal order, index 0 = Aries
pub const SIGN_ORDER: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

/// Wrap any longitude into [0, 360)
pub fn normalize_longitude(longitude: f64) -> f64 {
    let wrapped = longitude.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Get sign index (0-11) from longitude
pub fn get_sign_index(longitude: f64) -> u8 {
    let normalized = normalize_longitude(longitude);
    ((normalized / SIGN_SPAN).floor() as u8).min(11)
}

/// Degrees already travelled inside the current sign, in [0, 30)
pub fn degree_in_sign(longitude: f64) -> f64 {
    normalize_longitude(longitude) % SIGN_SPAN
}

impl ZodiacSign {
    pub fn from_longitude(longitude: f64) -> Self {
        SIGN_ORDER[get_sign_index(longitude) as usize]
    }

    pub fn from_index(index: u8) -> Self {
        SIGN_ORDER[(index % 12) as usize]
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    /// Longitude where this sign begins
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * SIGN_SPAN
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_longitude_maps_to_one_sign() {
        let mut lon = 0.0;
        while lon < 360.0 {
            let sign = ZodiacSign::from_longitude(lon);
            assert_eq!(sign.index() as f64, (lon / 30.0).floor());
            assert!(sign.start_longitude() <= lon && lon < sign.start_longitude() + 30.0);
            lon += 0.25;
        }
    }

    #[test]
    fn test_sign_boundaries() {
        assert_eq!(ZodiacSign::from_longitude(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(29.999), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(30.0), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::from_longitude(359.999), ZodiacSign::Pisces);
    }

    #[test]
    fn test_normalize_wraps() {
        assert_eq!(normalize_longitude(360.0), 0.0);
        assert_eq!(normalize_longitude(-10.0), 350.0);
        assert_eq!(normalize_longitude(725.0), 5.0);
        assert!(normalize_longitude(-1e-18) < 360.0);
    }
}
