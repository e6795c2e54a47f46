//! Cosine tone generator.

use std::f64::consts::{PI, TAU};

use crate::signals::{PureTone, SampleClock, Signal};

/// Generates `amplitude * cos(2π f t + phase π) + offset` over a sample clock.
#[derive(Debug, Clone)]
pub struct ToneOscillator {
    amplitude: f64,
    frequency: f64,
    phase: f64,
    offset: f64,
    clock: SampleClock,
}

impl ToneOscillator {
    /// Creates an oscillator that renders `params` as `len` samples.
    pub fn new(params: &PureTone, len: usize) -> Self {
        Self {
            amplitude: params.amplitude,
            frequency: params.frequency,
            phase: params.phase,
            offset: params.offset,
            clock: SampleClock::new(params.duration, len),
        }
    }
}

impl Signal for ToneOscillator {
    fn next_sample(&mut self) -> f64 {
        let t = self.clock.tick();
        self.amplitude * (TAU * self.frequency * t + self.phase * PI).cos() + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_starts_at_peak_without_phase() {
        let params = PureTone::new(440.0).with_amplitude(1.0);
        let mut osc = ToneOscillator::new(&params, 8820);
        assert!((osc.next_sample() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_half_period_phase_inverts() {
        let params = PureTone::new(440.0).with_amplitude(0.5).with_phase(1.0);
        let mut osc = ToneOscillator::new(&params, 8820);
        assert!((osc.next_sample() + 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_offset_shifts_signal() {
        let params = PureTone::new(0.0).with_amplitude(0.25).with_offset(-0.5);
        let mut osc = ToneOscillator::new(&params, 16);
        let mut buffer = [0.0; 16];
        osc.process(&mut buffer);
        assert!(buffer.iter().all(|s| (s + 0.25).abs() < EPSILON));
    }
}
