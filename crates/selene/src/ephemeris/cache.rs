//! Daily position cache and the batched window fetcher.

use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::types::{Body, CelestialPosition, DailyPositions, Observer, ObserverKey};
use crate::error::EngineError;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

pub const DEFAULT_WINDOW_DAYS: u32 = 30;
pub const DEFAULT_BATCH_SIZE: usize = 7;
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Instant at which a calendar day is sampled (00:00 UTC)
pub fn sample_instant(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Bounded cache of sampled days keyed by (date, observer).
///
/// Once `capacity` entries are held, inserting evicts the earliest dates first.
#[derive(Debug)]
pub struct PositionCache {
    entries: RwLock<BTreeMap<(NaiveDate, ObserverKey), DailyPositions>>,
    capacity: usize,
}

impl Default for PositionCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl PositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, date: NaiveDate, observer: &Observer) -> Option<DailyPositions> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(date, observer.cache_key()))
            .cloned()
    }

    pub fn contains(&self, date: NaiveDate, observer: &Observer) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&(date, observer.cache_key()))
    }

    pub fn insert(&self, observer: &Observer, day: DailyPositions) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert((day.date, observer.cache_key()), day);
        while entries.len() > self.capacity {
            if let Some(((date, _), _)) = entries.pop_first() {
                log::trace!("position cache full, evicted {}", date);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

/// Consecutive sampled days: the query window plus the day before it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionWindow {
    start: NaiveDate,
    entries: BTreeMap<NaiveDate, DailyPositions>,
}

impl PositionWindow {
    /// Build a window from already-sampled days. `start` is the first day of
    /// the query window; the day before it should be among `days`.
    pub fn from_days(start: NaiveDate, days: impl IntoIterator<Item = DailyPositions>) -> Self {
        Self {
            start,
            entries: days.into_iter().map(|d| (d.date, d)).collect(),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyPositions> {
        self.entries.get(&date)
    }

    /// The boundary day immediately preceding the window
    pub fn preceding(&self) -> Option<&DailyPositions> {
        self.entries.get(&(self.start - Duration::days(1)))
    }

    /// Days inside the window, ascending
    pub fn days(&self) -> impl Iterator<Item = &DailyPositions> {
        self.entries.range(self.start..).map(|(_, d)| d)
    }

    /// (previous day, day) for every window day whose previous day was sampled
    pub fn consecutive_pairs(&self) -> Vec<(&DailyPositions, &DailyPositions)> {
        self.days()
            .filter_map(|day| {
                self.entries
                    .get(&(day.date - Duration::days(1)))
                    .map(|prev| (prev, day))
            })
            .collect()
    }

    /// The sampled day on `date`, or the latest sampled day before it
    pub fn on_or_before(&self, date: NaiveDate) -> Option<&DailyPositions> {
        self.entries.range(..=date).next_back().map(|(_, d)| d)
    }

    pub fn position_of(&self, date: NaiveDate, body: Body) -> Option<&CelestialPosition> {
        self.on_or_before(date).and_then(|d| d.get(body))
    }
}

/// Fetches windows of daily positions through the cache, batching provider calls
pub struct PositionFetcher<P> {
    provider: P,
    cache: PositionCache,
    batch_size: usize,
}

impl<P: EphemerisProvider> PositionFetcher<P> {
    pub fn new(provider: P) -> Self {
        Self::with_batch_size(provider, DEFAULT_BATCH_SIZE)
    }

    pub fn with_batch_size(provider: P, batch_size: usize) -> Self {
        Self::with_cache_capacity(provider, batch_size, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(provider: P, batch_size: usize, cache_capacity: usize) -> Self {
        Self {
            provider,
            cache: PositionCache::with_capacity(cache_capacity),
            batch_size: batch_size.max(1),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &PositionCache {
        &self.cache
    }

    /// `days` consecutive days from `start`, plus the day before `start`.
    ///
    /// Any failed date aborts the whole window.
    pub async fn fetch_window(
        &self,
        start: NaiveDate,
        days: u32,
        observer: &Observer,
    ) -> Result<PositionWindow, EngineError> {
        if days == 0 {
            return Err(EngineError::InvalidWindow {
                message: "window length must be at least one day".to_string(),
            });
        }

        let dates: Vec<NaiveDate> = (-1..days as i64)
            .map(|offset| start + Duration::days(offset))
            .collect();
        let entries = self.ensure_dates(&dates, observer).await?;
        Ok(PositionWindow::from_days(start, entries))
    }

    /// Sampled positions for each of `dates`, fetching whatever the cache lacks.
    ///
    /// Results are assembled from this call's own reads and fetches, so a
    /// request larger than the cache capacity still completes.
    pub async fn ensure_dates(
        &self,
        dates: &[NaiveDate],
        observer: &Observer,
    ) -> Result<Vec<DailyPositions>, EngineError> {
        let mut found: HashMap<NaiveDate, DailyPositions> = HashMap::with_capacity(dates.len());
        let mut missing = Vec::new();
        for date in dates {
            if found.contains_key(date) {
                continue;
            }
            match self.cache.get(*date, observer) {
                Some(day) => {
                    found.insert(*date, day);
                }
                None => missing.push(*date),
            }
        }
        missing.sort();
        missing.dedup();

        log::debug!(
            "position window: {} days requested, {} cached, {} to fetch",
            dates.len(),
            found.len(),
            missing.len()
        );

        for batch in missing.chunks(self.batch_size) {
            for day in self.fetch_batch(batch, observer).await? {
                found.insert(day.date, day);
            }
        }

        dates
            .iter()
            .map(|d| {
                found.get(d).cloned().ok_or(EngineError::IncompleteBatch {
                    from: *d,
                    expected: 1,
                    received: 0,
                })
            })
            .collect()
    }

    async fn fetch_batch(
        &self,
        batch: &[NaiveDate],
        observer: &Observer,
    ) -> Result<Vec<DailyPositions>, EngineError> {
        let (Some(first), Some(last)) = (batch.first().copied(), batch.last().copied()) else {
            return Ok(Vec::new());
        };
        let instants: Vec<DateTime<Utc>> = batch.iter().map(|d| sample_instant(*d)).collect();

        let results = self
            .provider
            .positions_batch(&instants, observer)
            .await
            .map_err(|source| {
                log::warn!("ephemeris fetch failed for {}..={}: {}", first, last, source);
                EngineError::UpstreamFetch {
                    from: first,
                    to: last,
                    source,
                }
            })?;

        if results.len() != batch.len() {
            return Err(EngineError::IncompleteBatch {
                from: first,
                expected: batch.len(),
                received: results.len(),
            });
        }

        let fetched: Vec<DailyPositions> = batch
            .iter()
            .zip(instants)
            .zip(results)
            .map(|((date, timestamp), positions)| DailyPositions {
                date: *date,
                timestamp,
                positions,
            })
            .collect();
        for day in &fetched {
            self.cache.insert(observer, day.clone());
        }
        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampled(date: NaiveDate) -> DailyPositions {
        DailyPositions {
            date,
            timestamp: sample_instant(date),
            positions: Vec::new(),
        }
    }

    #[test]
    fn test_cache_evicts_earliest_dates() {
        let cache = PositionCache::with_capacity(3);
        let observer = Observer::greenwich();
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        for offset in [4, 0, 2, 1, 3] {
            cache.insert(&observer, sampled(start + Duration::days(offset)));
        }

        assert_eq!(cache.len(), 3);
        assert!(!cache.contains(start, &observer));
        assert!(!cache.contains(start + Duration::days(1), &observer));
        for offset in 2..5 {
            assert!(cache.contains(start + Duration::days(offset), &observer));
        }
    }

    #[test]
    fn test_zero_capacity_still_holds_one_day() {
        let cache = PositionCache::with_capacity(0);
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        cache.insert(&Observer::greenwich(), sampled(date));
        assert_eq!(cache.capacity(), 1);
        assert!(cache.contains(date, &Observer::greenwich()));
    }
}
