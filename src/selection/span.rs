//! Span-to-sample mapping and the `Selection` type.

use std::ops::RangeInclusive;

use crate::envelopes::FadeEnvelope;
use crate::error::{Error, Result};
use crate::signals::{GeneratedSignal, TimeAxis};

/// Inclusive range of sample indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRange {
    pub start: usize,
    pub end: usize,
}

impl SampleRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    /// Always false; an inclusive range holds at least one index.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Ranges shorter than two samples carry nothing worth playing.
    pub fn is_playable(&self) -> bool {
        self.len() >= 2
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Maps the span `[xmin, xmax]` (seconds) onto `axis`.
///
/// Each bound becomes the smallest index whose time is `>= bound`, clamped to
/// the last sample when the bound lies past the end of the axis. Returns
/// `None` for an empty axis.
///
/// # Examples
///
/// ```
/// use tonebench::{TimeAxis, map_span_to_samples};
///
/// let axis = TimeAxis::new(1.0, 10);
/// let range = map_span_to_samples(&axis, 0.25, 0.5).unwrap();
/// assert_eq!((range.start, range.end), (3, 5));
/// ```
pub fn map_span_to_samples(axis: &TimeAxis, xmin: f64, xmax: f64) -> Option<SampleRange> {
    let last = axis.len().checked_sub(1)?;
    let start = axis.first_index_not_less_than(xmin).min(last);
    let end = axis.first_index_not_less_than(xmax).min(last);
    Some(SampleRange { start, end })
}

/// A time span picked on a signal's plot together with its sample range.
///
/// A selection belongs to one rendered signal and is replaced by the next
/// drag; it is meaningless once the signal is regenerated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    start_time: f64,
    end_time: f64,
    range: SampleRange,
}

impl Selection {
    /// Builds a selection from two drag coordinates in either order.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if either coordinate is NaN or infinite.
    /// An empty axis yields `Ok(None)`.
    pub fn new(axis: &TimeAxis, a: f64, b: f64) -> Result<Option<Self>> {
        for (name, value) in [("span start", a), ("span end", b)] {
            if !value.is_finite() {
                return Err(Error::invalid(name, value, "must be a finite time"));
            }
        }
        let (start_time, end_time) = if a <= b { (a, b) } else { (b, a) };
        Ok(map_span_to_samples(axis, start_time, end_time).map(|range| Self {
            start_time,
            end_time,
            range,
        }))
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn range(&self) -> SampleRange {
        self.range
    }

    pub fn is_playable(&self) -> bool {
        self.range.is_playable()
    }

    /// Copies the selected samples out of `signal`.
    ///
    /// Returns `None` when fewer than two samples are selected or the range
    /// does not fit the signal.
    pub fn extract(&self, signal: &GeneratedSignal) -> Option<GeneratedSignal> {
        if !self.is_playable() {
            return None;
        }
        let samples = signal.samples().get(self.range.indices())?.to_vec();
        Some(GeneratedSignal::from_samples(samples, signal.sample_rate()))
    }

    /// Like `extract()`, with `fade` applied to the copy.
    pub fn extract_faded(
        &self,
        signal: &GeneratedSignal,
        fade: &FadeEnvelope,
    ) -> Option<GeneratedSignal> {
        if !self.is_playable() {
            return None;
        }
        let source = signal.samples().get(self.range.indices())?;
        let samples = fade.faded(source, signal.sample_rate());
        Some(GeneratedSignal::from_samples(samples, signal.sample_rate()))
    }

    /// `MM:SS.mmm-MM:SS.mmm` label for window titles.
    pub fn label(&self) -> String {
        format!(
            "{}-{}",
            format_timestamp(self.start_time),
            format_timestamp(self.end_time)
        )
    }
}

/// Formats seconds as `MM:SS.mmm`.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor();
    let remainder = seconds - minutes * 60.0;
    format!("{:02}:{:06.3}", minutes as u64, remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(len: usize) -> GeneratedSignal {
        let samples = (0..len).map(|i| i as f64).collect();
        GeneratedSignal::new(samples, 10, len as f64 / 10.0)
    }

    #[test]
    fn test_exact_hits_take_lowest_index() {
        let axis = TimeAxis::new(1.0, 10);
        let range = map_span_to_samples(&axis, 0.2, 0.7).unwrap();
        assert_eq!(range, SampleRange { start: 2, end: 7 });
    }

    #[test]
    fn test_between_samples_rounds_up() {
        let axis = TimeAxis::new(1.0, 10);
        let range = map_span_to_samples(&axis, 0.11, 0.59).unwrap();
        assert_eq!(range, SampleRange { start: 2, end: 6 });
    }

    #[test]
    fn test_out_of_range_clamps() {
        let axis = TimeAxis::new(1.0, 10);
        assert_eq!(
            map_span_to_samples(&axis, -5.0, -1.0),
            Some(SampleRange { start: 0, end: 0 })
        );
        assert_eq!(
            map_span_to_samples(&axis, 3.0, 4.0),
            Some(SampleRange { start: 9, end: 9 })
        );
        assert_eq!(
            map_span_to_samples(&axis, -1.0, 4.0),
            Some(SampleRange { start: 0, end: 9 })
        );
    }

    #[test]
    fn test_empty_axis() {
        assert_eq!(map_span_to_samples(&TimeAxis::new(1.0, 0), 0.0, 1.0), None);
    }

    #[test]
    fn test_zero_width_is_not_playable() {
        let axis = TimeAxis::new(1.0, 10);
        let selection = Selection::new(&axis, 0.35, 0.35).unwrap().unwrap();
        assert_eq!(selection.range().len(), 1);
        assert!(!selection.is_playable());
        assert!(selection.extract(&signal(10)).is_none());
    }

    #[test]
    fn test_reversed_drag_is_ordered() {
        let axis = TimeAxis::new(1.0, 10);
        let selection = Selection::new(&axis, 0.8, 0.3).unwrap().unwrap();
        assert_eq!(selection.start_time(), 0.3);
        assert_eq!(selection.end_time(), 0.8);
        assert_eq!(selection.range(), SampleRange { start: 3, end: 8 });
    }

    #[test]
    fn test_rejects_non_finite_coordinates() {
        let axis = TimeAxis::new(1.0, 10);
        assert!(Selection::new(&axis, f64::NAN, 0.5).is_err());
        assert!(Selection::new(&axis, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_extract_is_inclusive() {
        let source = signal(10);
        let selection = Selection::new(&source.time_axis(), 0.2, 0.5)
            .unwrap()
            .unwrap();
        let clip = selection.extract(&source).unwrap();
        assert_eq!(clip.samples(), &[2.0, 3.0, 4.0, 5.0]);
        assert_eq!(clip.sample_rate(), 10);
    }

    #[test]
    fn test_extract_faded_does_not_touch_source() {
        let source = GeneratedSignal::from_samples(vec![1.0; 1000], 1000);
        let selection = Selection::new(&source.time_axis(), 0.1, 0.9)
            .unwrap()
            .unwrap();
        let clip = selection
            .extract_faded(&source, &FadeEnvelope::default())
            .unwrap();
        assert_eq!(clip.samples()[0], 0.0);
        assert_eq!(*clip.samples().last().unwrap(), 0.0);
        assert!(source.samples().iter().all(|&s| s == 1.0));
    }

    #[test]
    fn test_timestamps() {
        assert_eq!(format_timestamp(0.0), "00:00.000");
        assert_eq!(format_timestamp(1.25), "00:01.250");
        assert_eq!(format_timestamp(75.5), "01:15.500");
    }

    #[test]
    fn test_label() {
        let axis = TimeAxis::new(2.0, 100);
        let selection = Selection::new(&axis, 0.5, 1.5).unwrap().unwrap();
        assert_eq!(selection.label(), "00:00.500-00:01.500");
    }
}
