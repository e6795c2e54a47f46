//! Square wave generator with duty cycle.

use std::f64::consts::{PI, TAU};

use crate::signals::{SampleClock, Signal, SquareWave};

/// Unit square wave of `x` radians: `+1` for the first `duty` fraction of
/// each period, `-1` for the rest.
///
/// `duty = 0.0` is always low and `duty = 1.0` always high.
pub fn square(x: f64, duty: f64) -> f64 {
    if x.rem_euclid(TAU) < duty * TAU {
        1.0
    } else {
        -1.0
    }
}

/// Generates `amplitude * square(2π f t + phase π; duty) + offset`.
#[derive(Debug, Clone)]
pub struct SquareOscillator {
    amplitude: f64,
    frequency: f64,
    phase: f64,
    offset: f64,
    duty: f64,
    clock: SampleClock,
}

impl SquareOscillator {
    pub fn new(params: &SquareWave, len: usize) -> Self {
        Self {
            amplitude: params.amplitude,
            frequency: params.frequency,
            phase: params.phase,
            offset: params.offset,
            duty: params.duty,
            clock: SampleClock::new(params.duration, len),
        }
    }
}

impl Signal for SquareOscillator {
    fn next_sample(&mut self) -> f64 {
        let t = self.clock.tick();
        let x = TAU * self.frequency * t + self.phase * PI;
        self.amplitude * square(x, self.duty) + self.offset
    }
}
