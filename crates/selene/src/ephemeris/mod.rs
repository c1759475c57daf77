pub mod adapter;
pub mod cache;
pub mod provider;
pub mod types;

pub use adapter::{EphemerisError, SwissEphemerisAdapter};
pub use cache::{sample_instant, PositionCache, PositionFetcher, PositionWindow};
pub use provider::{EphemerisProvider, NatalChartProvider};
pub use types::{
    BirthData, Body, CelestialPosition, DailyPositions, Observer, SignDuration, CORE_BODIES,
};
