use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use selene::aspects::{OrbTable, DEFAULT_ASPECT_CAP};
use selene::ephemeris::cache::{DEFAULT_BATCH_SIZE, DEFAULT_CACHE_CAPACITY, DEFAULT_WINDOW_DAYS};
use selene::ephemeris::{BirthData, Observer};
use selene::EngineSettings;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_IMPACT_LIMIT: usize = 10;

/// Everything the report binary needs, resolved from `configs/selene.toml`
#[derive(Debug, Clone)]
pub struct SeleneSettings {
    pub engine: EngineSettings,
    pub impact_limit: usize,
    pub ephemeris_path: Option<PathBuf>,
    pub natal: Option<BirthData>,
}

#[derive(Debug, Clone, Deserialize)]
struct ObserverToml {
    lat: f64,
    lon: f64,
    #[serde(default)]
    elevation: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct WindowToml {
    #[serde(default = "default_days")]
    days: u32,
    #[serde(default = "default_batch_size")]
    batch_size: usize,
    #[serde(default = "default_cache_capacity")]
    cache_capacity: usize,
}

impl Default for WindowToml {
    fn default() -> Self {
        Self {
            days: default_days(),
            batch_size: default_batch_size(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ImpactsToml {
    #[serde(default = "default_impact_limit")]
    limit: usize,
    #[serde(default = "default_aspect_cap")]
    aspect_cap: usize,
}

impl Default for ImpactsToml {
    fn default() -> Self {
        Self {
            limit: default_impact_limit(),
            aspect_cap: default_aspect_cap(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct NatalToml {
    date: NaiveDate,
    /// UTC birth time; omit when unknown
    #[serde(default)]
    time: Option<NaiveTime>,
    lat: f64,
    lon: f64,
    #[serde(default)]
    elevation: f64,
}

fn default_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_impact_limit() -> usize {
    DEFAULT_IMPACT_LIMIT
}

fn default_aspect_cap() -> usize {
    DEFAULT_ASPECT_CAP
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    observer: Option<ObserverToml>,
    #[serde(default)]
    window: WindowToml,
    #[serde(default)]
    orbs: OrbTable,
    #[serde(default)]
    impacts: ImpactsToml,
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    natal: Option<NatalToml>,
}

/// Try the common relative paths for `configs/selene.toml`.
pub fn read_config_text() -> anyhow::Result<String> {
    let paths = ["configs/selene.toml", "../../configs/selene.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load selene.toml from {:?}", paths);
}

fn validate_coordinates(section: &str, lat: f64, lon: f64) -> anyhow::Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        anyhow::bail!("{section}.lat must be within [-90, 90], got {lat}");
    }
    if !(-180.0..=180.0).contains(&lon) {
        anyhow::bail!("{section}.lon must be within [-180, 180], got {lon}");
    }
    Ok(())
}

fn validate_orbs(orbs: &OrbTable) -> anyhow::Result<()> {
    for (name, orb) in [
        ("conjunction", orbs.conjunction),
        ("opposition", orbs.opposition),
        ("trine", orbs.trine),
        ("square", orbs.square),
        ("sextile", orbs.sextile),
    ] {
        if !orb.is_finite() || orb < 0.0 {
            anyhow::bail!("orbs.{name} must be a non-negative number of degrees, got {orb}");
        }
    }
    Ok(())
}

/// Parse and validate a selene.toml document
pub fn parse_settings(text: &str) -> anyhow::Result<SeleneSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse selene.toml: {e}"))?;
    let RootConfigToml {
        observer,
        window,
        orbs,
        impacts,
        ephemeris,
        natal,
    } = root;

    let observer = match observer {
        Some(o) => {
            validate_coordinates("observer", o.lat, o.lon)?;
            Observer::new(o.lat, o.lon, o.elevation)
        }
        None => Observer::greenwich(),
    };
    if window.days == 0 {
        anyhow::bail!("window.days must be at least 1");
    }
    if window.batch_size == 0 {
        anyhow::bail!("window.batch_size must be at least 1");
    }
    if window.cache_capacity == 0 {
        anyhow::bail!("window.cache_capacity must be at least 1");
    }
    validate_orbs(&orbs)?;

    let natal = match natal {
        Some(n) => {
            validate_coordinates("natal", n.lat, n.lon)?;
            // unknown birth times are charted at 12:00 UTC
            let time = n.time.unwrap_or_else(|| NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
            Some(BirthData {
                instant: Utc.from_utc_datetime(&n.date.and_time(time)),
                time_known: n.time.is_some(),
                location: Observer::new(n.lat, n.lon, n.elevation),
            })
        }
        None => None,
    };

    Ok(SeleneSettings {
        engine: EngineSettings {
            observer,
            window_days: window.days,
            batch_size: window.batch_size,
            cache_capacity: window.cache_capacity,
            orbs,
            aspect_cap: impacts.aspect_cap,
        },
        impact_limit: impacts.limit,
        ephemeris_path: ephemeris.path,
        natal,
    })
}

pub fn load_settings() -> anyhow::Result<SeleneSettings> {
    let text = read_config_text()?;
    parse_settings(&text)
}
