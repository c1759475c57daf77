pub mod calculator;
pub mod types;

pub use calculator::{angular_separation, signed_motion, AspectCalculator, DEFAULT_ASPECT_CAP, ORB_EPSILON};
pub use types::{Aspect, AspectDuration, AspectKind, AspectMatch, OrbTable, SkyAspect, ASPECT_KINDS};
