//! Error type shared by synthesis, playback and I/O.

use thiserror::Error;

/// Errors surfaced by the core.
///
/// Selections that collapse to fewer than two samples are not errors; the
/// selection API reports them as `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// A signal parameter was outside its accepted range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// No usable output device (missing hardware, permission denied, busy).
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The device failed while a clip was sounding.
    #[error("playback failed: {0}")]
    Playback(String),

    /// Playback was requested after the worker consumed its shutdown message.
    #[error("playback worker has been shut down")]
    WorkerTerminated,

    /// A bounded playback queue had no room for another request.
    #[error("playback queue is full ({0} pending)")]
    QueueFull(usize),

    /// The FFT planner rejected its buffers.
    #[error("fft failed: {0}")]
    Fft(#[from] realfft::FftError),

    #[cfg(feature = "wav")]
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Error::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    /// Returns true for failures the playback worker recovers from.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::DeviceUnavailable(_) | Error::Playback(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
