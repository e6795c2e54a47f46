//! Single-frame magnitude spectrum, as shown by the FFT tuner.

use std::f64::consts::TAU;

use realfft::RealFftPlanner;

use crate::error::{Error, Result};

/// Floor added before taking the logarithm so silent bins stay finite.
const DB_FLOOR: f64 = 1e-8;

/// Magnitude spectrum of one Hann-windowed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    frequencies: Vec<f64>,
    magnitudes: Vec<f64>,
    sample_rate: u32,
    frame_len: usize,
}

impl Spectrum {
    /// Windows `samples` with a Hann window and takes a real FFT over the
    /// whole frame.
    ///
    /// Bin `k` sits at `k * fs / N`; magnitudes are scaled by `2 / N`, so a
    /// bin-centred sine of amplitude `A` reads about `A / 2` after the
    /// window's coherent gain.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` for a frame shorter than two samples or a
    /// zero sample rate.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonebench::analysis::Spectrum;
    ///
    /// let fs = 8000;
    /// let frame: Vec<f64> = (0..fs)
    ///     .map(|i| (std::f64::consts::TAU * 1000.0 * i as f64 / fs as f64).sin())
    ///     .collect();
    /// let spectrum = Spectrum::analyze(&frame, fs).unwrap();
    /// assert_eq!(spectrum.peak_frequency(), Some(1000.0));
    /// ```
    pub fn analyze(samples: &[f64], sample_rate: u32) -> Result<Self> {
        let n = samples.len();
        if n < 2 {
            return Err(Error::invalid(
                "frame length",
                n as f64,
                "need at least two samples",
            ));
        }
        if sample_rate == 0 {
            return Err(Error::invalid(
                "sample rate",
                0.0,
                "must be greater than zero",
            ));
        }

        let mut planner = RealFftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(n);
        let mut input: Vec<f64> = samples
            .iter()
            .zip(hann(n))
            .map(|(s, w)| s * w)
            .collect();
        let mut output = fft.make_output_vec();
        fft.process(&mut input, &mut output)?;

        let scale = 2.0 / n as f64;
        let bin_width = f64::from(sample_rate) / n as f64;
        let magnitudes = output.iter().map(|c| c.norm() * scale).collect();
        let frequencies = (0..output.len()).map(|k| k as f64 * bin_width).collect();

        Ok(Self {
            frequencies,
            magnitudes,
            sample_rate,
            frame_len: n,
        })
    }

    /// Bin centre frequencies in Hz, from 0 to Nyquist.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Linear magnitudes, one per bin.
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// `20 * log10(magnitude + 1e-8)` per bin.
    pub fn magnitudes_db(&self) -> Vec<f64> {
        self.magnitudes
            .iter()
            .map(|m| 20.0 * (m + DB_FLOOR).log10())
            .collect()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Frequency of the strongest bin, ignoring DC.
    pub fn peak_frequency(&self) -> Option<f64> {
        self.magnitudes
            .iter()
            .enumerate()
            .skip(1)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| self.frequencies[k])
    }
}

/// Symmetric Hann window of `n` points.
pub(crate) fn hann(n: usize) -> impl Iterator<Item = f64> {
    let denom = (n - 1) as f64;
    (0..n).map(move |i| 0.5 - 0.5 * (TAU * i as f64 / denom).cos())
}
