//! Equal-temperament pitch conversion.

/// MIDI note number of the A4 reference.
pub const A4_MIDI: i32 = 69;

/// Frequency of A4 in Hz.
pub const A4_HZ: f64 = 440.0;

/// A frequency value in Hz.
///
/// # Examples
///
/// ```
/// use tonebench::music::Frequency;
///
/// let a4 = Frequency::from_midi(69);
/// assert_eq!(a4.as_f64(), 440.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Frequency(f64);

impl Frequency {
    pub fn from_hz(hz: f64) -> Self {
        Frequency(hz)
    }

    /// Twelve-tone equal temperament: `440 * 2^((note - 69) / 12)`.
    ///
    /// Any integer is accepted; notes outside the MIDI range simply produce
    /// very low or very high frequencies.
    pub fn from_midi(midi_note: i32) -> Self {
        let hz = A4_HZ * 2.0_f64.powf(f64::from(midi_note - A4_MIDI) / 12.0);
        Frequency(hz)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Frequency {
    fn from(hz: f64) -> Self {
        Frequency::from_hz(hz)
    }
}

impl From<Frequency> for f64 {
    fn from(freq: Frequency) -> Self {
        freq.0
    }
}

/// MIDI note for a key `semitone_offset` semitones above the base of `octave`.
///
/// `semitone_offset + octave * 12`, with no range checks.
pub fn midi_note(semitone_offset: i32, octave: i32) -> i32 {
    semitone_offset + octave * 12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_midi() {
        assert_eq!(Frequency::from_midi(69).as_f64(), 440.0);
        assert!((Frequency::from_midi(57).as_f64() - 220.0).abs() < 1e-9);
        assert!((Frequency::from_midi(60).as_f64() - 261.6256).abs() < 1e-3);
    }

    #[test]
    fn test_out_of_range_notes_are_not_clamped() {
        assert!((Frequency::from_midi(-3).as_f64() - 440.0 / 64.0).abs() < 1e-9);
        assert!(Frequency::from_midi(200).as_f64() > 20_000.0);
    }

    #[test]
    fn test_midi_note() {
        assert_eq!(midi_note(0, 4), 48);
        assert_eq!(midi_note(21, 4), 69);
        assert_eq!(midi_note(9, 5), 69);
    }

    #[test]
    fn test_conversions() {
        let freq: Frequency = 330.0.into();
        let hz: f64 = freq.into();
        assert_eq!(hz, 330.0);
    }
}
