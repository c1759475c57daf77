//! Transit and aspect engine.
//!
//! Turns daily body positions into dated sky events, matches transits against
//! a natal chart and composes personal impact notes.

pub mod aspects;
pub mod chart;
pub mod engine;
pub mod ephemeris;
pub mod error;
pub mod impact;
pub mod transits;
pub mod western;

pub use chart::NatalChart;
pub use engine::{EngineSettings, TransitEngine};
pub use error::EngineError;
pub use impact::PersonalTransitImpact;
pub use transits::{TransitEvent, TransitKind};
