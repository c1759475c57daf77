//! Collaborator traits for the ephemeris and natal chart sources.

use crate::chart::NatalChart;
use crate::ephemeris::adapter::EphemerisError;
use crate::ephemeris::types::{BirthData, CelestialPosition, Observer};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Supplies body positions for an instant and observer location.
///
/// Implementations must not retry internally; the engine treats any error as
/// fatal for the window being computed.
#[async_trait]
pub trait EphemerisProvider: Send + Sync {
    async fn positions(
        &self,
        instant: DateTime<Utc>,
        observer: &Observer,
    ) -> Result<Vec<CelestialPosition>, EphemerisError>;

    /// Positions for several instants in one call, in the same order as `instants`.
    ///
    /// The default implementation loops over [`EphemerisProvider::positions`];
    /// remote providers should override it with a single round trip.
    async fn positions_batch(
        &self,
        instants: &[DateTime<Utc>],
        observer: &Observer,
    ) -> Result<Vec<Vec<CelestialPosition>>, EphemerisError> {
        let mut out = Vec::with_capacity(instants.len());
        for instant in instants {
            out.push(self.positions(*instant, observer).await?);
        }
        Ok(out)
    }
}

/// Converts stored birth data into a natal chart.
///
/// When the birth time is unknown the returned chart carries no Ascendant.
#[async_trait]
pub trait NatalChartProvider: Send + Sync {
    async fn natal_chart(&self, birth: &BirthData) -> Result<NatalChart, EphemerisError>;
}
