//! Pitch and harmonic helpers for the keyboard-driven additive generator.

mod frequency;
mod harmonics;
mod keyboard;

pub use frequency::{A4_HZ, A4_MIDI, Frequency, midi_note};
pub use harmonics::{HARMONIC_AMPLITUDES, Harmonic, HarmonicSeries};
pub use keyboard::{
    BLACK_KEYS, KEY_PREVIEW_SECS, NOTE_NAMES, Octave, PianoKey, WHITE_KEYS, keyboard,
    note_to_harmonics, piano_note,
};
