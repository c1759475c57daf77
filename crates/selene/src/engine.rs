//! Entry points used by the API layer.

use crate::aspects::calculator::{AspectCalculator, DEFAULT_ASPECT_CAP};
use crate::aspects::types::{Aspect, OrbTable, SkyAspect};
use crate::chart::NatalChart;
use crate::ephemeris::cache::{
    PositionFetcher, PositionWindow, DEFAULT_BATCH_SIZE, DEFAULT_CACHE_CAPACITY,
    DEFAULT_WINDOW_DAYS,
};
use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::types::Observer;
use crate::error::EngineError;
use crate::impact::synthesizer::{impact_sample_date, synthesize_impacts, PersonalTransitImpact};
use crate::transits::calendar::aggregate_window_events;
use crate::transits::types::TransitEvent;
use crate::western::houses::house_reference;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Tunables for a [`TransitEngine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub observer: Observer,
    pub window_days: u32,
    pub batch_size: usize,
    /// Most sampled days kept in the position cache
    pub cache_capacity: usize,
    pub orbs: OrbTable,
    pub aspect_cap: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            observer: Observer::greenwich(),
            window_days: DEFAULT_WINDOW_DAYS,
            batch_size: DEFAULT_BATCH_SIZE,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            orbs: OrbTable::default(),
            aspect_cap: DEFAULT_ASPECT_CAP,
        }
    }
}

/// Transit calendar and personalisation over one ephemeris provider
pub struct TransitEngine<P> {
    fetcher: PositionFetcher<P>,
    calculator: AspectCalculator,
    settings: EngineSettings,
}

impl<P: EphemerisProvider> TransitEngine<P> {
    pub fn new(provider: P) -> Self {
        Self::with_settings(provider, EngineSettings::default())
    }

    pub fn with_settings(provider: P, settings: EngineSettings) -> Self {
        Self {
            fetcher: PositionFetcher::with_cache_capacity(
                provider,
                settings.batch_size,
                settings.cache_capacity,
            ),
            calculator: AspectCalculator::new(settings.orbs),
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn fetcher(&self) -> &PositionFetcher<P> {
        &self.fetcher
    }

    pub fn calculator(&self) -> &AspectCalculator {
        &self.calculator
    }

    /// Positions for the configured window starting at `start`
    pub async fn transit_window(&self, start: NaiveDate) -> Result<PositionWindow, EngineError> {
        self.fetcher
            .fetch_window(start, self.settings.window_days, &self.settings.observer)
            .await
    }

    /// Ordered, deduplicated events for the window starting at `start`
    pub async fn upcoming_transits(&self, start: NaiveDate) -> Result<Vec<TransitEvent>, EngineError> {
        let window = self.transit_window(start).await?;
        let events = aggregate_window_events(&window);
        log::info!(
            "{} transit events for {} days from {}",
            events.len(),
            self.settings.window_days,
            start
        );
        Ok(events)
    }

    /// Personal impacts of `transits` on a natal chart, in input order, at most `limit`.
    ///
    /// Without a chart there is nothing to personalise and the result is empty.
    /// Positions are fetched only for events that can still make the cut.
    pub async fn personal_transit_impacts(
        &self,
        transits: &[TransitEvent],
        natal: Option<&NatalChart>,
        limit: usize,
    ) -> Result<Vec<PersonalTransitImpact>, EngineError> {
        let Some(natal) = natal else {
            log::debug!("no natal chart supplied, skipping personal impacts");
            return Ok(Vec::new());
        };
        if house_reference(natal).is_none() {
            log::debug!("natal chart has no Ascendant or Sun, impacts unavailable");
            return Ok(Vec::new());
        }

        let mut impacts = Vec::with_capacity(limit.min(transits.len()));
        let mut remaining = transits;
        while impacts.len() < limit && !remaining.is_empty() {
            let take = (limit - impacts.len()).min(remaining.len());
            let (chunk, rest) = remaining.split_at(take);
            remaining = rest;

            let mut days: Vec<NaiveDate> = chunk.iter().map(impact_sample_date).collect();
            days.sort();
            days.dedup();
            let Some(first) = days.first().copied() else {
                break;
            };
            let entries = self
                .fetcher
                .ensure_dates(&days, &self.settings.observer)
                .await?;
            let window = PositionWindow::from_days(first, entries);

            let wanted = limit - impacts.len();
            impacts.extend(synthesize_impacts(chunk, natal, &window, &self.calculator, wanted));
        }

        Ok(impacts)
    }

    /// Ranked transit-to-natal aspects on one day, with applying state and
    /// time in orb taken from the motion since the previous day
    pub async fn todays_aspects(
        &self,
        date: NaiveDate,
        natal: &NatalChart,
    ) -> Result<Vec<Aspect>, EngineError> {
        let yesterday = date - Duration::days(1);
        let mut entries = self
            .fetcher
            .ensure_dates(&[yesterday, date], &self.settings.observer)
            .await?;
        let Some(today) = entries.pop() else {
            return Ok(Vec::new());
        };
        let prior = entries.pop();
        Ok(self
            .calculator
            .todays_aspects(&today, prior.as_ref(), natal, self.settings.aspect_cap))
    }

    /// Ranked aspects between the core bodies on one day
    pub async fn sky_aspects(&self, date: NaiveDate) -> Result<Vec<SkyAspect>, EngineError> {
        let mut entries = self
            .fetcher
            .ensure_dates(&[date], &self.settings.observer)
            .await?;
        Ok(entries
            .pop()
            .map(|day| self.calculator.sky_aspects(&day))
            .unwrap_or_default())
    }
}
