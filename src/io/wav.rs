//! PCM WAV import and export.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{Error, Result};
use crate::signals::GeneratedSignal;

/// Reads a WAV file as a mono signal.
///
/// Integer and float files are both accepted. Multichannel audio is mixed
/// down by averaging each frame, then rescaled so the mono peak matches the
/// loudest sample of the original channels.
///
/// # Errors
///
/// `Error::Wav` for unreadable files, `Error::InvalidParameter` for a
/// header claiming zero channels.
pub fn load_mono<P: AsRef<Path>>(path: P) -> Result<GeneratedSignal> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(Error::invalid("channels", 0.0, "file has no channels"));
    }

    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let full_scale = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / full_scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    log::debug!(
        "read {} samples, {} channel(s) at {} Hz",
        interleaved.len(),
        spec.channels,
        spec.sample_rate
    );

    let samples = mix_to_mono(&interleaved, usize::from(spec.channels));
    Ok(GeneratedSignal::from_samples(samples, spec.sample_rate))
}

/// Writes `signal` as a mono 32-bit float WAV file.
pub fn save<P: AsRef<Path>>(path: P, signal: &GeneratedSignal) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate(),
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for &sample in signal.samples() {
        writer.write_sample(sample as f32)?;
    }
    writer.finalize()?;
    Ok(())
}

fn mix_to_mono(interleaved: &[f64], channels: usize) -> Vec<f64> {
    if channels == 1 {
        return interleaved.to_vec();
    }

    let peak = interleaved.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
    let mut mono: Vec<f64> = interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect();

    let mono_peak = mono.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
    if mono_peak > 0.0 {
        let gain = peak / mono_peak;
        for s in &mut mono {
            *s *= gain;
        }
    }
    mono
}
