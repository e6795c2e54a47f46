//! Fixed six-partial harmonic ladder built on a fundamental.

use crate::signals::{AdditiveTones, Tone};

/// Relative amplitude of harmonics 1 through 6.
pub const HARMONIC_AMPLITUDES: [f64; 6] = [1.0, 0.83, 0.67, 0.5, 0.33, 0.17];

/// One partial of a harmonic series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harmonic {
    /// 1 for the fundamental, 2 for the octave above, ...
    pub number: u32,
    pub frequency: f64,
    pub amplitude: f64,
}

/// Harmonics 1 to 6 of a fundamental with the decreasing amplitude ladder.
///
/// Frequencies are plain multiples of the fundamental and are not limited
/// to any audible or displayable range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicSeries {
    harmonics: [Harmonic; 6],
}

impl HarmonicSeries {
    pub fn from_fundamental(fundamental: f64) -> Self {
        let harmonics = std::array::from_fn(|i| {
            let number = i as u32 + 1;
            Harmonic {
                number,
                frequency: fundamental * f64::from(number),
                amplitude: HARMONIC_AMPLITUDES[i],
            }
        });
        Self { harmonics }
    }

    pub fn fundamental(&self) -> f64 {
        self.harmonics[0].frequency
    }

    pub fn harmonics(&self) -> &[Harmonic] {
        &self.harmonics
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Harmonic> {
        self.harmonics.iter()
    }

    pub fn len(&self) -> usize {
        self.harmonics.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn to_tones(&self) -> Vec<Tone> {
        self.iter()
            .map(|h| Tone::new(h.frequency, h.amplitude))
            .collect()
    }

    /// Additive-tone parameters that replace a generator's tone slots.
    pub fn to_parameters(&self, duration: f64, sample_rate: u32) -> AdditiveTones {
        AdditiveTones {
            duration,
            sample_rate,
            tones: self.to_tones(),
        }
    }
}

impl<'a> IntoIterator for &'a HarmonicSeries {
    type Item = &'a Harmonic;
    type IntoIter = std::slice::Iter<'a, Harmonic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
