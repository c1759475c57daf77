#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use selene::chart::NatalChart;
use selene::ephemeris::{
    sample_instant, Body, CelestialPosition, DailyPositions, EphemerisError, EphemerisProvider,
    Observer, SignDuration,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn pos(body: Body, lon: f64) -> CelestialPosition {
    CelestialPosition::new(body, lon, false)
}

pub fn retro(body: Body, lon: f64) -> CelestialPosition {
    CelestialPosition::new(body, lon, true)
}

pub fn with_remaining(p: CelestialPosition, remaining_days: f64) -> CelestialPosition {
    p.with_duration(SignDuration {
        total_days: 30.0,
        remaining_days,
    })
}

pub fn day(d: NaiveDate, positions: Vec<CelestialPosition>) -> DailyPositions {
    DailyPositions {
        date: d,
        timestamp: sample_instant(d),
        positions,
    }
}

pub fn chart(positions: Vec<CelestialPosition>) -> NatalChart {
    NatalChart::new(
        Utc.with_ymd_and_hms(1990, 7, 5, 12, 0, 0).unwrap(),
        Some(Observer::greenwich()),
        positions,
    )
}

/// Deterministic provider: every body moves linearly from a base longitude
pub struct LinearProvider {
    pub epoch: NaiveDate,
    /// (body, longitude at epoch, degrees per day)
    pub motions: Vec<(Body, f64, f64)>,
    pub fail_on: Option<NaiveDate>,
    pub batch_calls: AtomicUsize,
    pub requested: Mutex<Vec<DateTime<Utc>>>,
}

impl LinearProvider {
    pub fn new(epoch: NaiveDate, motions: Vec<(Body, f64, f64)>) -> Self {
        Self {
            epoch,
            motions,
            fail_on: None,
            batch_calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, d: NaiveDate) -> Self {
        self.fail_on = Some(d);
        self
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn requested_days(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

#[async_trait]
impl EphemerisProvider for LinearProvider {
    async fn positions(
        &self,
        instant: DateTime<Utc>,
        _observer: &Observer,
    ) -> Result<Vec<CelestialPosition>, EphemerisError> {
        self.requested.lock().unwrap().push(instant);
        if Some(instant.date_naive()) == self.fail_on {
            return Err(EphemerisError::Unavailable {
                message: format!("no data for {}", instant.date_naive()),
            });
        }
        let elapsed = (instant.date_naive() - self.epoch).num_days() as f64;
        Ok(self
            .motions
            .iter()
            .map(|(body, base, speed)| {
                CelestialPosition::new(*body, base + speed * elapsed, *speed < 0.0)
            })
            .collect())
    }

    async fn positions_batch(
        &self,
        instants: &[DateTime<Utc>],
        observer: &Observer,
    ) -> Result<Vec<Vec<CelestialPosition>>, EphemerisError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        let mut out = Vec::with_capacity(instants.len());
        for instant in instants {
            out.push(self.positions(*instant, observer).await?);
        }
        Ok(out)
    }
}

/// Provider with hand-written days; unknown days return nothing
pub struct ScriptedProvider {
    pub days: HashMap<NaiveDate, Vec<CelestialPosition>>,
}

impl ScriptedProvider {
    pub fn new(days: Vec<(NaiveDate, Vec<CelestialPosition>)>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }
}

#[async_trait]
impl EphemerisProvider for ScriptedProvider {
    async fn positions(
        &self,
        instant: DateTime<Utc>,
        _observer: &Observer,
    ) -> Result<Vec<CelestialPosition>, EphemerisError> {
        Ok(self
            .days
            .get(&instant.date_naive())
            .cloned()
            .unwrap_or_default())
    }
}
