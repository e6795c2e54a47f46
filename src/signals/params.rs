//! Parameter sets for each signal family and their validation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Highest sample rate any generator accepts.
pub const MAX_SAMPLE_RATE: u32 = 48_000;

/// Number of tone slots in the additive generator.
pub const MAX_TONES: usize = 6;

/// Largest signal any generator renders: ten minutes at [`MAX_SAMPLE_RATE`].
///
/// Parameters whose `duration * sample_rate` exceeds this are rejected by
/// validation before any buffer is allocated.
pub const MAX_SAMPLES: usize = MAX_SAMPLE_RATE as usize * 600;

/// Parameters for a cosine tone: `amplitude * cos(2π f t + phase π) + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PureTone {
    /// Length in seconds
    pub duration: f64,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Peak amplitude, 0.0 to 1.0
    pub amplitude: f64,
    /// Frequency in Hz
    pub frequency: f64,
    /// Phase as a fraction of π
    pub phase: f64,
    /// DC offset, -1.0 to 1.0
    pub offset: f64,
}

impl Default for PureTone {
    fn default() -> Self {
        Self {
            duration: 0.2,
            sample_rate: 44_100,
            amplitude: 0.5,
            frequency: 440.0,
            phase: 0.0,
            offset: 0.0,
        }
    }
}

impl PureTone {
    /// Creates a tone at `frequency` with the remaining fields at their defaults.
    pub fn new(frequency: f64) -> Self {
        Self {
            frequency,
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_timing(self.duration, self.sample_rate)?;
        check_unit("amplitude", self.amplitude)?;
        check_frequency("frequency", self.frequency)?;
        check_finite("phase", self.phase)?;
        check_offset(self.offset)
    }
}

/// Parameters for a square wave with an adjustable duty cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SquareWave {
    pub duration: f64,
    pub sample_rate: u32,
    pub amplitude: f64,
    pub frequency: f64,
    /// Phase as a fraction of π
    pub phase: f64,
    pub offset: f64,
    /// Fraction of each period spent high, 0.0 to 1.0
    pub duty: f64,
}

impl Default for SquareWave {
    fn default() -> Self {
        Self {
            duration: 0.2,
            sample_rate: 44_100,
            amplitude: 0.8,
            frequency: 440.0,
            phase: 0.0,
            offset: 0.0,
            duty: 0.5,
        }
    }
}

impl SquareWave {
    pub fn new(frequency: f64) -> Self {
        Self {
            frequency,
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_duty(mut self, duty: f64) -> Self {
        self.duty = duty;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_timing(self.duration, self.sample_rate)?;
        check_unit("amplitude", self.amplitude)?;
        check_frequency("frequency", self.frequency)?;
        check_finite("phase", self.phase)?;
        check_offset(self.offset)?;
        check_unit("duty", self.duty)
    }
}

/// One sine component of an additive signal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tone {
    /// Frequency in Hz; `0.0` disables the slot
    pub frequency: f64,
    pub amplitude: f64,
}

impl Tone {
    pub fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }
}

/// Parameters for a sum of up to six sine tones.
///
/// The sum is not normalized: six tones at full amplitude can peak well
/// outside `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdditiveTones {
    pub duration: f64,
    pub sample_rate: u32,
    pub tones: Vec<Tone>,
}

impl Default for AdditiveTones {
    fn default() -> Self {
        let tones = crate::music::HarmonicSeries::from_fundamental(440.0)
            .iter()
            .map(|h| Tone::new(h.frequency, h.amplitude))
            .collect();
        Self {
            duration: 0.3,
            sample_rate: 48_000,
            tones,
        }
    }
}

impl AdditiveTones {
    pub fn new(tones: Vec<Tone>) -> Self {
        Self {
            tones,
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_timing(self.duration, self.sample_rate)?;
        if self.tones.len() > MAX_TONES {
            return Err(Error::invalid(
                "tones",
                self.tones.len() as f64,
                "at most six tones are supported",
            ));
        }
        for tone in &self.tones {
            check_frequency("tone frequency", tone.frequency)?;
            check_unit("tone amplitude", tone.amplitude)?;
        }
        Ok(())
    }
}

/// Spectral slope of a noise signal, `1/f^β`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NoiseColor {
    /// β = 0
    White,
    /// β = 1
    #[default]
    Pink,
    /// β = 2
    Brown,
}

impl NoiseColor {
    pub fn beta(self) -> f64 {
        match self {
            NoiseColor::White => 0.0,
            NoiseColor::Pink => 1.0,
            NoiseColor::Brown => 2.0,
        }
    }

    /// Looks up the color for an integer exponent (0, 1 or 2).
    pub fn from_beta(beta: u8) -> Option<Self> {
        match beta {
            0 => Some(NoiseColor::White),
            1 => Some(NoiseColor::Pink),
            2 => Some(NoiseColor::Brown),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NoiseColor::White => "White noise",
            NoiseColor::Pink => "Pink noise",
            NoiseColor::Brown => "Brown noise",
        }
    }
}

/// Parameters for Gaussian noise with a `1/f^β` power spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColoredNoise {
    pub duration: f64,
    pub sample_rate: u32,
    /// Exact peak amplitude of the rendered noise
    pub amplitude: f64,
    pub color: NoiseColor,
}

impl Default for ColoredNoise {
    fn default() -> Self {
        Self {
            duration: 1.0,
            sample_rate: 44_100,
            amplitude: 0.5,
            color: NoiseColor::Pink,
        }
    }
}

impl ColoredNoise {
    pub fn new(color: NoiseColor) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_timing(self.duration, self.sample_rate)?;
        check_unit("amplitude", self.amplitude)
    }
}

/// Parameters for any of the four signal families.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum SignalParameters {
    PureTone(PureTone),
    Square(SquareWave),
    Additive(AdditiveTones),
    Noise(ColoredNoise),
}

impl SignalParameters {
    pub fn duration(&self) -> f64 {
        match self {
            SignalParameters::PureTone(p) => p.duration,
            SignalParameters::Square(p) => p.duration,
            SignalParameters::Additive(p) => p.duration,
            SignalParameters::Noise(p) => p.duration,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        match self {
            SignalParameters::PureTone(p) => p.sample_rate,
            SignalParameters::Square(p) => p.sample_rate,
            SignalParameters::Additive(p) => p.sample_rate,
            SignalParameters::Noise(p) => p.sample_rate,
        }
    }

    /// `floor(duration * sample_rate)`; zero means a degenerate empty signal.
    pub fn sample_count(&self) -> usize {
        sample_count(self.duration(), self.sample_rate())
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            SignalParameters::PureTone(p) => p.validate(),
            SignalParameters::Square(p) => p.validate(),
            SignalParameters::Additive(p) => p.validate(),
            SignalParameters::Noise(p) => p.validate(),
        }
    }

    /// Title used when the signal is handed to an analysis window.
    pub fn title(&self) -> String {
        match self {
            SignalParameters::PureTone(p) => format!("Pure Tone {}Hz", p.frequency),
            SignalParameters::Square(p) => {
                format!("Square Wave {}Hz (Duty: {:.2})", p.frequency, p.duty)
            }
            SignalParameters::Additive(_) => "Free Addition".to_string(),
            SignalParameters::Noise(p) => format!("{} ({:.2}s)", p.color.name(), p.duration),
        }
    }
}

impl From<PureTone> for SignalParameters {
    fn from(params: PureTone) -> Self {
        SignalParameters::PureTone(params)
    }
}

impl From<SquareWave> for SignalParameters {
    fn from(params: SquareWave) -> Self {
        SignalParameters::Square(params)
    }
}

impl From<AdditiveTones> for SignalParameters {
    fn from(params: AdditiveTones) -> Self {
        SignalParameters::Additive(params)
    }
}

impl From<ColoredNoise> for SignalParameters {
    fn from(params: ColoredNoise) -> Self {
        SignalParameters::Noise(params)
    }
}

pub(crate) fn sample_count(duration: f64, sample_rate: u32) -> usize {
    (duration * f64::from(sample_rate)).floor() as usize
}

fn check_timing(duration: f64, sample_rate: u32) -> Result<()> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(Error::invalid(
            "duration",
            duration,
            "must be a finite number of seconds greater than zero",
        ));
    }
    if sample_rate == 0 || sample_rate > MAX_SAMPLE_RATE {
        return Err(Error::invalid(
            "sample_rate",
            f64::from(sample_rate),
            "must be between 1 and 48000 Hz",
        ));
    }
    if duration * f64::from(sample_rate) > MAX_SAMPLES as f64 {
        return Err(Error::invalid(
            "duration",
            duration,
            "exceeds the sample budget of ten minutes at 48000 Hz",
        ));
    }
    Ok(())
}

fn check_unit(name: &'static str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::invalid(name, value, "must be between 0.0 and 1.0"));
    }
    Ok(())
}

fn check_offset(value: f64) -> Result<()> {
    if !(-1.0..=1.0).contains(&value) {
        return Err(Error::invalid("offset", value, "must be between -1.0 and 1.0"));
    }
    Ok(())
}

fn check_frequency(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::invalid(name, value, "must be a finite, non-negative frequency"));
    }
    Ok(())
}

fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid(name, value, "must be finite"));
    }
    Ok(())
}
