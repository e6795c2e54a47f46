//! Frequency-domain and level views of rendered or loaded audio.

mod envelope;
mod spectrogram;
mod spectrum;

pub use envelope::{ENVELOPE_WINDOW_SECS, amplitude_envelope};
pub use spectrogram::{DEFAULT_HOP, DEFAULT_WINDOW, DYNAMIC_RANGE_DB, Spectrogram};
pub use spectrum::Spectrum;
