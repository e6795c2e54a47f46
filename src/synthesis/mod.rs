//! Waveform synthesis for every signal family.
//!
//! `synthesize()` validates a parameter set and renders it into a
//! `GeneratedSignal`. Tones and square waves are deterministic; noise draws a
//! fresh realization on each call unless a seeded RNG is supplied through
//! `synthesize_with_rng()`.

mod additive;
pub mod noise;
mod square;
mod tone;

pub use additive::AdditiveOscillator;
pub use square::{SquareOscillator, square};
pub use tone::ToneOscillator;

use rand::Rng;

use crate::error::Result;
use crate::signals::{GeneratedSignal, Signal, SignalParameters};

/// Renders `params` with the thread-local random generator.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` before allocating anything when a
/// parameter is out of range. A valid parameter set whose
/// `duration * sample_rate` is below one yields an empty signal.
///
/// # Examples
///
/// ```
/// use tonebench::{PureTone, synthesize};
///
/// let signal = synthesize(&PureTone::new(440.0).into()).unwrap();
/// assert_eq!(signal.len(), 8820);
/// ```
pub fn synthesize(params: &SignalParameters) -> Result<GeneratedSignal> {
    synthesize_with_rng(params, &mut rand::thread_rng())
}

/// Renders `params`, drawing any randomness from `rng`.
pub fn synthesize_with_rng<R: Rng>(
    params: &SignalParameters,
    rng: &mut R,
) -> Result<GeneratedSignal> {
    params.validate()?;

    let len = params.sample_count();
    let sample_rate = params.sample_rate();
    let duration = params.duration();
    if len == 0 {
        log::debug!("{duration}s at {sample_rate} Hz is shorter than one sample");
        return Ok(GeneratedSignal::empty(sample_rate, duration));
    }

    let samples = match params {
        SignalParameters::PureTone(p) => render(ToneOscillator::new(p, len), len),
        SignalParameters::Square(p) => render(SquareOscillator::new(p, len), len),
        SignalParameters::Additive(p) => render(AdditiveOscillator::new(p, len), len),
        SignalParameters::Noise(p) => noise::colored_noise(p, len, rng)?,
    };

    Ok(GeneratedSignal::new(samples, sample_rate, duration))
}

fn render(mut source: impl Signal, len: usize) -> Vec<f64> {
    let mut buffer = vec![0.0; len];
    source.process(&mut buffer);
    buffer
}
