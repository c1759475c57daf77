use crate::ephemeris::adapter::EphemerisError;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by the transit engine entry points
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Ephemeris fetch failed for {from}..={to}: {source}")]
    UpstreamFetch {
        from: NaiveDate,
        to: NaiveDate,
        #[source]
        source: EphemerisError,
    },
    #[error("Ephemeris batch starting {from} returned {received} days, expected {expected}")]
    IncompleteBatch {
        from: NaiveDate,
        expected: usize,
        received: usize,
    },
    #[error("Invalid window: {message}")]
    InvalidWindow { message: String },
}
