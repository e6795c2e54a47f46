//! Output device abstraction.

use std::sync::Arc;

use crate::error::Result;
use crate::signals::GeneratedSignal;

/// Samples ready to be sent to an output device.
///
/// Cloning a clip shares the sample buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    samples: Arc<[f64]>,
    sample_rate: u32,
}

impl Clip {
    pub fn new(samples: Arc<[f64]>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn shared_samples(&self) -> Arc<[f64]> {
        Arc::clone(&self.samples)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playing time in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

impl From<&GeneratedSignal> for Clip {
    fn from(signal: &GeneratedSignal) -> Self {
        Clip::new(signal.shared_samples(), signal.sample_rate())
    }
}

impl From<GeneratedSignal> for Clip {
    fn from(signal: GeneratedSignal) -> Self {
        Clip::from(&signal)
    }
}

/// An exclusively owned audio output.
///
/// The playback worker calls `play()` from its own thread while previews
/// call `stop()` and `start()` from the caller's thread, so implementations
/// must be shareable. At most one clip sounds at a time: `start()` and
/// `play()` replace whatever is current, and `stop()` makes a blocked
/// `play()` return early.
pub trait AudioSink: Send + Sync {
    /// Plays `clip` and blocks until it has finished or been stopped.
    fn play(&self, clip: &Clip) -> Result<()>;

    /// Starts `clip` and returns immediately.
    fn start(&self, clip: &Clip) -> Result<()>;

    /// Silences the current clip. Does nothing when idle.
    fn stop(&self);
}

/// Sink that discards everything, used when no device is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&self, clip: &Clip) -> Result<()> {
        log::debug!("null sink discarding {} samples", clip.len());
        Ok(())
    }

    fn start(&self, clip: &Clip) -> Result<()> {
        log::debug!("null sink discarding preview of {} samples", clip.len());
        Ok(())
    }

    fn stop(&self) {}
}
