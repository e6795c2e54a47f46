//! Tonebench - signal generation and interactive playback for teaching audio.
//!
//! The crate renders test signals (pure tones, additive tones, square waves
//! and colored noise), maps drag selections on a plotted waveform to sample
//! ranges, fades the extracted clips and plays them through a serialized
//! playback worker. `analysis` holds the spectrum, spectrogram and amplitude
//! envelope views.
//!
//! ```
//! use tonebench::{PureTone, map_span_to_samples, synthesize};
//!
//! let signal = synthesize(&PureTone::new(440.0).into()).unwrap();
//! let range = map_span_to_samples(&signal.time_axis(), 0.05, 0.1).unwrap();
//! assert!(range.start <= range.end);
//! ```

pub mod analysis;
pub mod config;
pub mod envelopes;
pub mod error;
#[cfg(feature = "wav")]
pub mod io;
pub mod music;
pub mod playback;
pub mod selection;
pub mod session;
pub mod signals;
pub mod synthesis;

// Re-export commonly used types at the crate root
pub use config::Settings;
pub use envelopes::{Curve, FadeEnvelope, apply_fade};
pub use error::{Error, Result};
pub use music::{Frequency, HarmonicSeries, Octave, PianoKey, note_to_harmonics, piano_note};
#[cfg(feature = "device")]
pub use playback::CpalSink;
pub use playback::{AudioSink, Clip, NullSink, PlaybackEvent, Player, RequestId};
pub use selection::{SampleRange, Selection, map_span_to_samples};
pub use session::{Capabilities, GeneratorSession, Handoff, NullWindowFactory, WindowFactory};
pub use signals::{
    AdditiveTones, ColoredNoise, GeneratedSignal, NoiseColor, PureTone, Signal, SignalParameters,
    SquareWave, TimeAxis, Tone,
};
pub use synthesis::{synthesize, synthesize_with_rng};
