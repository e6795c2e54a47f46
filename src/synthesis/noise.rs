//! Gaussian noise with a power-law spectrum.
//!
//! The spectrum is built directly in the frequency domain: each bin gets a
//! complex Gaussian value scaled by `f^(-β/2)`, then a real inverse FFT
//! produces the time signal. β = 0 gives white noise, 1 pink, 2 brown.

use std::f64::consts::{SQRT_2, TAU};

use rand::Rng;
use realfft::RealFftPlanner;
use realfft::num_complex::Complex;

use crate::error::Result;
use crate::signals::ColoredNoise;

/// Renders `len` samples of colored noise whose peak equals `params.amplitude`.
///
/// Each call draws a new realization from `rng`; only the peak is fixed, the
/// RMS level varies between draws.
///
/// # Errors
///
/// Returns `Error::Fft` if the inverse transform rejects the spectrum.
pub fn colored_noise<R: Rng>(params: &ColoredNoise, len: usize, rng: &mut R) -> Result<Vec<f64>> {
    let raw = power_law_gaussian(params.color.beta(), len, rng)?;
    Ok(normalize_peak(raw, params.amplitude))
}

/// Gaussian noise of length `len` with power spectral density `1/f^beta`.
///
/// The output is not scaled to any particular variance.
pub fn power_law_gaussian<R: Rng>(beta: f64, len: usize, rng: &mut R) -> Result<Vec<f64>> {
    match len {
        0 => return Ok(Vec::new()),
        1 => return Ok(vec![standard_normal(rng)]),
        _ => {}
    }

    let bins = len / 2 + 1;
    // The DC bin borrows the lowest resolvable frequency, 1/len
    let f_min = 1.0 / len as f64;
    let mut spectrum: Vec<Complex<f64>> = (0..bins)
        .map(|k| {
            let f = (k as f64 / len as f64).max(f_min);
            let scale = f.powf(-beta / 2.0);
            Complex::new(scale * standard_normal(rng), scale * standard_normal(rng))
        })
        .collect();

    // DC and (for even lengths) Nyquist must be real
    spectrum[0].im = 0.0;
    spectrum[0].re *= SQRT_2;
    if len % 2 == 0 {
        let nyquist = &mut spectrum[bins - 1];
        nyquist.im = 0.0;
        nyquist.re *= SQRT_2;
    }

    inverse_real(&mut spectrum, len)
}

/// Real inverse FFT of a half spectrum into `len` time samples.
fn inverse_real(spectrum: &mut [Complex<f64>], len: usize) -> Result<Vec<f64>> {
    let mut planner = RealFftPlanner::<f64>::new();
    let inverse = planner.plan_fft_inverse(len);
    let mut output = inverse.make_output_vec();
    inverse.process(spectrum, &mut output)?;
    Ok(output)
}

/// Scales `samples` so the largest absolute value becomes `amplitude`.
///
/// An all-zero buffer stays all zero.
pub fn normalize_peak(mut samples: Vec<f64>, amplitude: f64) -> Vec<f64> {
    let peak = samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
    if peak > 0.0 {
        for sample in samples.iter_mut() {
            *sample = amplitude * (*sample / peak);
        }
    }
    samples
}

/// One draw from N(0, 1) using the Box-Muller transform.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // u1 > 0 keeps the logarithm finite
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}
