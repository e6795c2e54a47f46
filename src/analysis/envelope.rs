//! Smoothed amplitude over time.

/// Length of the moving-average window, in seconds.
pub const ENVELOPE_WINDOW_SECS: f64 = 0.02;

/// Moving average of `|x|` over a centred 20 ms window.
///
/// The output has one value per input sample. Near the edges the window
/// runs past the signal and the missing samples count as zero, so the
/// envelope tapers at both ends. A rate too low for a 20 ms window to hold
/// a whole sample returns `|x|` unchanged.
///
/// # Examples
///
/// ```
/// use tonebench::analysis::amplitude_envelope;
///
/// let envelope = amplitude_envelope(&vec![-0.5; 1000], 8000);
/// assert_eq!(envelope.len(), 1000);
/// assert!((envelope[500] - 0.5).abs() < 1e-12);
/// ```
pub fn amplitude_envelope(samples: &[f64], sample_rate: u32) -> Vec<f64> {
    let window = ((ENVELOPE_WINDOW_SECS * f64::from(sample_rate)) as usize).max(1);
    let after = (window - 1) / 2;
    let before = window - 1 - after;

    let mut prefix = Vec::with_capacity(samples.len() + 1);
    prefix.push(0.0);
    let mut total = 0.0;
    for sample in samples {
        total += sample.abs();
        prefix.push(total);
    }

    let n = samples.len();
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(before);
            let hi = (i + after + 1).min(n);
            (prefix[hi] - prefix[lo]) / window as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_sine_envelope_sits_near_mean_absolute_value() {
        let fs = 8000;
        let amplitude = 0.5;
        let samples: Vec<f64> = (0..fs)
            .map(|i| amplitude * (TAU * 400.0 * f64::from(i) / f64::from(fs)).sin())
            .collect();
        let envelope = amplitude_envelope(&samples, fs);

        let expected = 2.0 * amplitude / PI;
        for &value in &envelope[200..7800] {
            assert!((value - expected).abs() < 0.02 * expected, "value {value}");
        }
    }

    #[test]
    fn test_edges_taper() {
        let envelope = amplitude_envelope(&vec![1.0; 400], 8000);
        assert!((envelope[0] - 0.5).abs() < 0.01);
        assert!((envelope[200] - 1.0).abs() < 1e-12);
        assert!((envelope[399] - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_low_rate_returns_magnitudes() {
        assert_eq!(amplitude_envelope(&[0.3, -0.7], 10), vec![0.3, 0.7]);
        assert!(amplitude_envelope(&[], 44_100).is_empty());
    }
}
