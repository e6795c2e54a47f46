//! Click-free fade-in/fade-out for extracted sample ranges.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Curve;

/// Nominal fade length in seconds.
pub const DEFAULT_FADE_SECS: f64 = 0.02;

/// Ramps applied to both ends of a clip so it starts and stops at zero.
///
/// The fade length is `floor(duration * sample_rate)`, limited to a quarter
/// of the clip so short clips get proportionally shorter fades and the two
/// ramps never overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FadeEnvelope {
    duration: f64,
    curve: Curve,
}

impl Default for FadeEnvelope {
    fn default() -> Self {
        Self {
            duration: DEFAULT_FADE_SECS,
            curve: Curve::default(),
        }
    }
}

impl FadeEnvelope {
    /// Creates a quadratic fade of `duration` seconds.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Number of samples each ramp covers for a clip of `len` samples.
    pub fn fade_len(&self, len: usize, sample_rate: u32) -> usize {
        let nominal = (self.duration * f64::from(sample_rate)).floor() as usize;
        nominal.min(len / 4)
    }

    /// Fades `samples` in place and returns the ramp length used.
    ///
    /// Sample `i` of the head is scaled by `curve(i / fade_len)` and the tail
    /// mirrors it, so the first and last samples become zero.
    pub fn apply(&self, samples: &mut [f64], sample_rate: u32) -> usize {
        let len = samples.len();
        let fade_len = self.fade_len(len, sample_rate);
        for i in 0..fade_len {
            let gain = self.curve.ramp_gain(i, fade_len);
            samples[i] *= gain;
            samples[len - 1 - i] *= gain;
        }
        fade_len
    }

    /// Returns a faded copy, leaving `samples` untouched.
    pub fn faded(&self, samples: &[f64], sample_rate: u32) -> Vec<f64> {
        let mut copy = samples.to_vec();
        self.apply(&mut copy, sample_rate);
        copy
    }
}

/// Applies a quadratic fade of `fade_secs` to both ends of `samples`.
///
/// Returns the number of samples in each ramp.
pub fn apply_fade(samples: &mut [f64], sample_rate: u32, fade_secs: f64) -> usize {
    FadeEnvelope::new(fade_secs).apply(samples, sample_rate)
}
