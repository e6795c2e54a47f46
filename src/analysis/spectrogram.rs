//! Short-time Fourier transform over a whole signal.

use realfft::RealFftPlanner;

use crate::error::{Error, Result};

use super::spectrum::hann;

/// Default frame length in samples.
pub const DEFAULT_WINDOW: usize = 1024;

/// Default distance between frame starts in samples.
pub const DEFAULT_HOP: usize = 256;

/// Levels are clipped this far below the loudest bin.
pub const DYNAMIC_RANGE_DB: f64 = 80.0;

/// Hann-windowed STFT magnitudes in dB relative to the loudest bin.
///
/// Frames start at sample 0 and advance by `hop`; trailing samples that do
/// not fill a whole frame are left out. A signal shorter than one window is
/// zero-padded into a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    times: Vec<f64>,
    frequencies: Vec<f64>,
    frames: Vec<Vec<f64>>,
    sample_rate: u32,
    window: usize,
    hop: usize,
}

impl Spectrogram {
    /// # Errors
    ///
    /// `Error::InvalidParameter` for an empty signal, a window shorter than
    /// two samples, a zero hop or a zero sample rate.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonebench::analysis::{DEFAULT_HOP, DEFAULT_WINDOW, Spectrogram};
    ///
    /// let fs = 8000;
    /// let tone: Vec<f64> = (0..fs)
    ///     .map(|i| (std::f64::consts::TAU * 500.0 * i as f64 / fs as f64).sin())
    ///     .collect();
    /// let spectrogram = Spectrogram::analyze(&tone, fs, DEFAULT_WINDOW, DEFAULT_HOP).unwrap();
    /// assert!(spectrogram.peak_frequencies().iter().all(|&f| f == 500.0));
    /// ```
    pub fn analyze(samples: &[f64], sample_rate: u32, window: usize, hop: usize) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::invalid("signal length", 0.0, "need at least one sample"));
        }
        if window < 2 {
            return Err(Error::invalid("window", window as f64, "need at least two samples"));
        }
        if hop == 0 {
            return Err(Error::invalid("hop", 0.0, "must be greater than zero"));
        }
        if sample_rate == 0 {
            return Err(Error::invalid("sample rate", 0.0, "must be greater than zero"));
        }

        let fs = f64::from(sample_rate);
        let starts: Vec<usize> = if samples.len() < window {
            vec![0]
        } else {
            (0..=samples.len() - window).step_by(hop).collect()
        };
        log::debug!(
            "stft of {} samples: {} frames of {window}, hop {hop}",
            samples.len(),
            starts.len()
        );

        let taper: Vec<f64> = hann(window).collect();
        let mut planner = RealFftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(window);
        let mut input = fft.make_input_vec();
        let mut output = fft.make_output_vec();

        let mut frames = Vec::with_capacity(starts.len());
        for &start in &starts {
            let end = (start + window).min(samples.len());
            input.fill(0.0);
            for ((slot, s), w) in input.iter_mut().zip(&samples[start..end]).zip(&taper) {
                *slot = s * w;
            }
            fft.process(&mut input, &mut output)?;
            frames.push(output.iter().map(|c| c.norm()).collect::<Vec<f64>>());
        }

        let loudest = frames
            .iter()
            .flatten()
            .fold(0.0_f64, |acc, &m| acc.max(m));
        for frame in frames.iter_mut() {
            for magnitude in frame.iter_mut() {
                *magnitude = to_db(*magnitude, loudest);
            }
        }

        let bin_width = fs / window as f64;
        Ok(Self {
            times: starts
                .iter()
                .map(|&start| (start as f64 + window as f64 / 2.0) / fs)
                .collect(),
            frequencies: (0..output.len()).map(|k| k as f64 * bin_width).collect(),
            frames,
            sample_rate,
            window,
            hop,
        })
    }

    /// Centre of each frame in seconds.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Bin centre frequencies in Hz, from 0 to Nyquist.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// One row of dB levels per frame, each in `-DYNAMIC_RANGE_DB..=0`.
    pub fn frames(&self) -> &[Vec<f64>] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Frequency of the strongest bin in each frame, ignoring DC.
    pub fn peak_frequencies(&self) -> Vec<f64> {
        self.frames
            .iter()
            .map(|frame| {
                frame
                    .iter()
                    .enumerate()
                    .skip(1)
                    .max_by(|a, b| a.1.total_cmp(b.1))
                    .map_or(0.0, |(k, _)| self.frequencies[k])
            })
            .collect()
    }
}

fn to_db(magnitude: f64, reference: f64) -> f64 {
    if reference <= 0.0 || magnitude <= 0.0 {
        return -DYNAMIC_RANGE_DB;
    }
    (20.0 * (magnitude / reference).log10()).max(-DYNAMIC_RANGE_DB)
}
