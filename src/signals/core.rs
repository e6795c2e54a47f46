//! Core signal trait and the sample clock that drives generators.

/// Common interface for every per-sample generator in the crate.
///
/// Generators evaluate their waveform at the time of the current sample and
/// advance; batch rendering goes through `process()`.
pub trait Signal {
    /// Generates the next sample from the signal.
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// Walks the time axis of a signal one sample at a time.
///
/// The time of sample `i` is `i * duration / len`, the same grid as
/// `TimeAxis`, computed from the index rather than accumulated so that
/// long signals do not drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleClock {
    index: usize,
    step: f64,
}

impl SampleClock {
    /// Creates a clock for `len` samples spread over `duration` seconds.
    pub fn new(duration: f64, len: usize) -> Self {
        let step = if len == 0 { 0.0 } else { duration / len as f64 };
        Self { index: 0, step }
    }

    /// Returns the time of the current sample and advances to the next one.
    pub fn tick(&mut self) -> f64 {
        let t = self.index as f64 * self.step;
        self.index += 1;
        t
    }

    /// Index of the sample the next `tick()` will report.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Seconds between consecutive samples.
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ramp(f64);

    impl Signal for Ramp {
        fn next_sample(&mut self) -> f64 {
            self.0 += 1.0;
            self.0
        }
    }

    #[test]
    fn test_process_fills_buffer() {
        let mut ramp = Ramp(0.0);
        let mut buffer = [0.0; 4];
        ramp.process(&mut buffer);
        assert_eq!(buffer, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_clock_matches_linspace() {
        let mut clock = SampleClock::new(1.0, 4);
        let times: Vec<f64> = (0..4).map(|_| clock.tick()).collect();
        assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(clock.position(), 4);
    }

    #[test]
    fn test_clock_reset() {
        let mut clock = SampleClock::new(0.5, 10);
        clock.tick();
        clock.tick();
        clock.reset();
        assert_eq!(clock.tick(), 0.0);
    }

    #[test]
    fn test_empty_clock() {
        let clock = SampleClock::new(1.0, 0);
        assert_eq!(clock.step(), 0.0);
    }
}
