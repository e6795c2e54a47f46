//! Rendered sample buffers and the time axis derived from them.

use std::sync::Arc;

/// A rendered signal: samples, the rate they play at and the span they cover.
///
/// Samples are shared behind an `Arc` and never mutated after creation, so a
/// signal can be handed to the plot, the selection logic and the playback
/// worker at the same time. Changing a parameter means rendering a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSignal {
    samples: Arc<[f64]>,
    sample_rate: u32,
    duration: f64,
}

impl GeneratedSignal {
    /// Wraps rendered samples that span `duration` seconds.
    pub fn new(samples: Vec<f64>, sample_rate: u32, duration: f64) -> Self {
        Self {
            samples: samples.into(),
            sample_rate,
            duration,
        }
    }

    /// Wraps samples whose duration is implied by their count (`len / fs`).
    ///
    /// Used for extracted selections and loaded recordings.
    pub fn from_samples(samples: Vec<f64>, sample_rate: u32) -> Self {
        let duration = if sample_rate == 0 {
            0.0
        } else {
            samples.len() as f64 / f64::from(sample_rate)
        };
        Self::new(samples, sample_rate, duration)
    }

    /// A signal with no samples, produced when `duration * fs < 1`.
    pub fn empty(sample_rate: u32, duration: f64) -> Self {
        Self::new(Vec::new(), sample_rate, duration)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Shared handle to the sample buffer.
    pub fn shared_samples(&self) -> Arc<[f64]> {
        Arc::clone(&self.samples)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True when the signal has enough samples to be worth sending to a device.
    ///
    /// Signals of zero or one sample are treated as "nothing to play".
    pub fn is_playable(&self) -> bool {
        self.samples.len() >= 2 && self.sample_rate > 0
    }

    /// Largest absolute sample value, `0.0` for an empty signal.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()))
    }

    /// The time coordinate of every sample.
    pub fn time_axis(&self) -> TimeAxis {
        TimeAxis::new(self.duration, self.samples.len())
    }
}

/// Evenly spaced sample times `[0, duration)` with one entry per sample.
///
/// Equivalent to `linspace(0, duration, len, endpoint=False)`; the axis is
/// never stored, each value is computed from its index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    duration: f64,
    len: usize,
    step: f64,
}

impl TimeAxis {
    pub fn new(duration: f64, len: usize) -> Self {
        let step = if len == 0 { 0.0 } else { duration / len as f64 };
        Self {
            duration,
            len,
            step,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Seconds between consecutive samples.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Time of sample `index`, `None` past the end of the axis.
    pub fn get(&self, index: usize) -> Option<f64> {
        (index < self.len).then(|| self.at(index))
    }

    /// Time of the last sample, `None` for an empty axis.
    pub fn last(&self) -> Option<f64> {
        self.len.checked_sub(1).map(|i| self.at(i))
    }

    /// Smallest index whose time is `>= time`, or `len()` if there is none.
    ///
    /// Binary search over the monotonically increasing axis.
    pub fn first_index_not_less_than(&self, time: f64) -> usize {
        let (mut lo, mut hi) = (0, self.len);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.at(mid) < time {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |i| self.at(i))
    }

    fn at(&self, index: usize) -> f64 {
        index as f64 * self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_samples_duration() {
        let signal = GeneratedSignal::from_samples(vec![0.0; 22050], 44100);
        assert_eq!(signal.duration(), 0.5);
        assert_eq!(signal.len(), 22050);
    }

    #[test]
    fn test_playable() {
        assert!(!GeneratedSignal::empty(44100, 0.0).is_playable());
        assert!(!GeneratedSignal::from_samples(vec![0.3], 44100).is_playable());
        assert!(GeneratedSignal::from_samples(vec![0.3, 0.1], 44100).is_playable());
    }

    #[test]
    fn test_peak() {
        let signal = GeneratedSignal::from_samples(vec![0.2, -0.7, 0.5], 8000);
        assert_eq!(signal.peak(), 0.7);
        assert_eq!(GeneratedSignal::empty(8000, 0.0).peak(), 0.0);
    }

    #[test]
    fn test_clone_shares_samples() {
        let signal = GeneratedSignal::from_samples(vec![1.0, 2.0], 8000);
        let copy = signal.clone();
        assert!(Arc::ptr_eq(&signal.shared_samples(), &copy.shared_samples()));
    }

    #[test]
    fn test_time_axis_values() {
        let axis = TimeAxis::new(1.0, 4);
        let values: Vec<f64> = axis.iter().collect();
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(axis.get(4), None);
        assert_eq!(axis.last(), Some(0.75));
    }

    #[test]
    fn test_time_axis_matches_signal_length() {
        let signal = GeneratedSignal::new(vec![0.0; 100], 44100, 100.0 / 44100.0);
        assert_eq!(signal.time_axis().len(), signal.len());
    }

    #[test]
    fn test_first_index_not_less_than() {
        let axis = TimeAxis::new(1.0, 4);
        assert_eq!(axis.first_index_not_less_than(-1.0), 0);
        assert_eq!(axis.first_index_not_less_than(0.0), 0);
        assert_eq!(axis.first_index_not_less_than(0.1), 1);
        assert_eq!(axis.first_index_not_less_than(0.25), 1);
        assert_eq!(axis.first_index_not_less_than(0.8), 4);
    }

    #[test]
    fn test_empty_axis() {
        let axis = TimeAxis::new(1.0, 0);
        assert!(axis.is_empty());
        assert_eq!(axis.last(), None);
        assert_eq!(axis.first_index_not_less_than(0.5), 0);
    }
}
