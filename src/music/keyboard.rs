//! Piano keys, octave selection and the key-strike preview tone.

use crate::envelopes::FadeEnvelope;
use crate::error::Result;
use crate::signals::{AdditiveTones, GeneratedSignal, Tone};
use crate::synthesis::synthesize;

use super::frequency::{Frequency, midi_note};
use super::harmonics::HarmonicSeries;

/// Note names indexed by semitone within an octave.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Semitone offsets of the white keys on the two-octave keyboard.
pub const WHITE_KEYS: [i32; 14] = [0, 2, 4, 5, 7, 9, 11, 12, 14, 16, 17, 19, 21, 23];

/// Semitone offsets of the black keys on the two-octave keyboard.
pub const BLACK_KEYS: [i32; 10] = [1, 3, 6, 8, 10, 13, 15, 18, 20, 22];

/// Length of the tone played when a key is struck.
pub const KEY_PREVIEW_SECS: f64 = 0.5;

const KEY_PREVIEW_AMPLITUDES: [f64; 3] = [0.6, 0.3, 0.1];

/// A key on the keyboard: a semitone offset above the base of an octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PianoKey {
    pub semitone_offset: i32,
    pub octave: i32,
}

impl PianoKey {
    pub fn new(semitone_offset: i32, octave: i32) -> Self {
        Self {
            semitone_offset,
            octave,
        }
    }

    pub fn midi_note(&self) -> i32 {
        midi_note(self.semitone_offset, self.octave)
    }

    pub fn frequency(&self) -> Frequency {
        Frequency::from_midi(self.midi_note())
    }

    pub fn harmonics(&self) -> HarmonicSeries {
        HarmonicSeries::from_fundamental(self.frequency().as_f64())
    }

    /// Note name of the key, e.g. `"F#"`.
    pub fn name(&self) -> &'static str {
        NOTE_NAMES[self.semitone_offset.rem_euclid(12) as usize]
    }

    /// Octave printed on the key: keys in the upper row show the next octave.
    pub fn display_octave(&self) -> i32 {
        self.octave + self.semitone_offset.div_euclid(12)
    }

    /// Key caption such as `"C#5"`.
    pub fn label(&self) -> String {
        format!("{}{}", self.name(), self.display_octave())
    }

    pub fn is_black(&self) -> bool {
        self.name().ends_with('#')
    }
}

/// Fundamental and harmonic ladder for a struck key.
///
/// No bounds checking is done on either argument.
///
/// # Examples
///
/// ```
/// use tonebench::note_to_harmonics;
///
/// let series = note_to_harmonics(21, 4);
/// assert_eq!(series.fundamental(), 440.0);
/// ```
pub fn note_to_harmonics(semitone_offset: i32, octave: i32) -> HarmonicSeries {
    PianoKey::new(semitone_offset, octave).harmonics()
}

/// Every key of the two-octave keyboard at `octave`, white keys first.
pub fn keyboard(octave: Octave) -> Vec<PianoKey> {
    WHITE_KEYS
        .iter()
        .chain(BLACK_KEYS.iter())
        .map(|&offset| PianoKey::new(offset, octave.get()))
        .collect()
}

/// Octave selector limited to `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Octave(i32);

impl Octave {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 8;

    /// Creates an octave, clamping to the supported range.
    pub fn new(octave: i32) -> Self {
        Octave(octave.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(&self) -> i32 {
        self.0
    }

    /// One octave higher, stopping at `MAX`.
    pub fn up(self) -> Self {
        Octave::new(self.0 + 1)
    }

    /// One octave lower, stopping at `MIN`.
    pub fn down(self) -> Self {
        Octave::new(self.0 - 1)
    }
}

impl Default for Octave {
    fn default() -> Self {
        Octave(4)
    }
}

/// Short tone heard when a key is struck: the first three harmonics of
/// `frequency` at 0.6, 0.3 and 0.1 with a 20 ms quadratic fade at each end.
pub fn piano_note(frequency: f64, sample_rate: u32) -> Result<GeneratedSignal> {
    let tones = KEY_PREVIEW_AMPLITUDES
        .iter()
        .zip(1..)
        .map(|(&amplitude, multiple): (&f64, u32)| {
            Tone::new(frequency * f64::from(multiple), amplitude)
        })
        .collect();
    let params = AdditiveTones::new(tones)
        .with_duration(KEY_PREVIEW_SECS)
        .with_sample_rate(sample_rate);
    let signal = synthesize(&params.into())?;

    let mut samples = signal.samples().to_vec();
    FadeEnvelope::default().apply(&mut samples, sample_rate);
    Ok(GeneratedSignal::new(samples, sample_rate, signal.duration()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_ladder() {
        let series = note_to_harmonics(21, 4);
        let expected = [
            (440.0, 1.0),
            (880.0, 0.83),
            (1320.0, 0.67),
            (1760.0, 0.5),
            (2200.0, 0.33),
            (2640.0, 0.17),
        ];
        for (h, (freq, amp)) in series.iter().zip(expected) {
            assert!((h.frequency - freq).abs() < 1e-9);
            assert_eq!(h.amplitude, amp);
        }
    }

    #[test]
    fn test_base_key_of_octave_four() {
        // midi 48
        let series = note_to_harmonics(0, 4);
        assert!((series.fundamental() - 130.8128).abs() < 1e-3);
    }

    #[test]
    fn test_labels() {
        assert_eq!(PianoKey::new(0, 4).label(), "C4");
        assert_eq!(PianoKey::new(13, 4).label(), "C#5");
        assert_eq!(PianoKey::new(23, 3).label(), "B4");
        assert!(PianoKey::new(6, 4).is_black());
        assert!(!PianoKey::new(7, 4).is_black());
    }

    #[test]
    fn test_keyboard_layout() {
        let keys = keyboard(Octave::default());
        assert_eq!(keys.len(), 24);
        assert_eq!(keys.iter().filter(|k| k.is_black()).count(), 10);
        assert!(keys.iter().all(|k| k.octave == 4));
    }

    #[test]
    fn test_octave_bounds() {
        assert_eq!(Octave::new(0).get(), 1);
        assert_eq!(Octave::new(12).get(), 8);
        assert_eq!(Octave::new(8).up().get(), 8);
        assert_eq!(Octave::new(1).down().get(), 1);
        assert_eq!(Octave::default().up().get(), 5);
    }

    #[test]
    fn test_piano_note_is_faded() {
        let note = piano_note(440.0, 48_000).unwrap();
        assert_eq!(note.len(), 24_000);
        assert_eq!(note.samples()[0], 0.0);
        assert_eq!(*note.samples().last().unwrap(), 0.0);
        assert!(note.peak() <= 1.0);
    }
}
