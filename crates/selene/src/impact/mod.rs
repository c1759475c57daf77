pub mod guidance;
pub mod synthesizer;

pub use guidance::guidance_for;
pub use guidance::aspect_interpretation;
pub use synthesizer::{
    annotate_aspects, impact_sample_date, impact_sentence, synthesize_impacts, AspectNote,
    PersonalTransitImpact,
};
