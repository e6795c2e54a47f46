//! Envelope shaping for extracted clips.
//!
//! `Curve` defines the ramp shape and `FadeEnvelope` applies matching
//! fade-in and fade-out ramps to the ends of a clip.

mod curve;
mod fade;

pub use curve::Curve;
pub use fade::{DEFAULT_FADE_SECS, FadeEnvelope, apply_fade};
