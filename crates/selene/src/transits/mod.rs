pub mod calendar;
pub mod lunar;
pub mod retrograde;
pub mod sign_change;
pub mod types;

pub use calendar::{aggregate_window_events, merge_event_streams, sort_and_dedup};
pub use lunar::{classify_phase, detect_lunar_phase, phase_fraction, LunarPhase};
pub use retrograde::detect_stations;
pub use sign_change::{crossing_instant, detect_sign_changes};
pub use types::{EventKey, Significance, TransitEvent, TransitKind};
