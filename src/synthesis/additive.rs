//! Sum of sine tones.

use std::f64::consts::TAU;

use crate::signals::{AdditiveTones, SampleClock, Signal, Tone};

/// Generates `Σ amplitude_k * sin(2π f_k t)` over the enabled tones.
///
/// Tones with a frequency of zero are skipped. The sum is not normalized.
#[derive(Debug, Clone)]
pub struct AdditiveOscillator {
    tones: Vec<Tone>,
    clock: SampleClock,
}

impl AdditiveOscillator {
    pub fn new(params: &AdditiveTones, len: usize) -> Self {
        let tones = params
            .tones
            .iter()
            .copied()
            .filter(|tone| tone.frequency > 0.0)
            .collect();
        Self {
            tones,
            clock: SampleClock::new(params.duration, len),
        }
    }

    /// Number of tones that contribute to the output.
    pub fn active_tones(&self) -> usize {
        self.tones.len()
    }
}

impl Signal for AdditiveOscillator {
    fn next_sample(&mut self) -> f64 {
        let t = self.clock.tick();
        self.tones
            .iter()
            .map(|tone| tone.amplitude * (TAU * tone.frequency * t).sin())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_frequency_tones_are_skipped() {
        let params = AdditiveTones::new(vec![Tone::new(0.0, 1.0), Tone::new(440.0, 0.5)]);
        let osc = AdditiveOscillator::new(&params, 100);
        assert_eq!(osc.active_tones(), 1);
    }

    #[test]
    fn test_silent_when_all_tones_disabled() {
        let params = AdditiveTones::new(vec![Tone::new(0.0, 1.0); 6]);
        let mut osc = AdditiveOscillator::new(&params, 64);
        let mut buffer = [1.0; 64];
        osc.process(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_sum_is_not_normalized() {
        // Six identical 1 Hz tones peak at the sum of their amplitudes
        let params = AdditiveTones::new(vec![Tone::new(1.0, 1.0); 6])
            .with_duration(1.0)
            .with_sample_rate(1000);
        let mut osc = AdditiveOscillator::new(&params, 1000);
        let mut buffer = vec![0.0; 1000];
        osc.process(&mut buffer);
        let peak = buffer.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
        assert!(peak > 5.9);
    }
}
