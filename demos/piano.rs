//! Two-octave keyboard driving the additive generator.
//!
//! The home row plays white keys, the row above plays black keys. Each key
//! loads its harmonic ladder into the generator and sounds a short note.
//! Z/X shift the octave, SPACE plays the generated additive signal.
//! Press Q or ESC to quit.

mod common;

use anyhow::Result;
use common::{KeyAction, open_session, print_screen, run_interactive};
use crossterm::event::{KeyCode, KeyEvent};
use std::cell::Cell;
use tonebench::{AdditiveTones, GeneratorSession, Octave, PianoKey, SignalParameters};

const WHITE_ROW: &str = "asdfghjkl;'";
const BLACK_ROW: &str = "wetyuop";
const WHITE_OFFSETS: [i32; 11] = [0, 2, 4, 5, 7, 9, 11, 12, 14, 16, 17];
const BLACK_OFFSETS: [i32; 7] = [1, 3, 6, 8, 10, 13, 15];

fn offset_for(c: char) -> Option<i32> {
    WHITE_ROW
        .find(c)
        .map(|i| WHITE_OFFSETS[i])
        .or_else(|| BLACK_ROW.find(c).map(|i| BLACK_OFFSETS[i]))
}

fn main() -> Result<()> {
    let octave = Cell::new(Octave::default());
    let last_key = Cell::new(None::<PianoKey>);

    let params: SignalParameters = AdditiveTones::default().into();
    let mut session = open_session(params)?;

    let draw = |session: &GeneratorSession, status: Option<&str>| -> Result<()> {
        let mut lines = vec![
            "Harmonic Piano".to_string(),
            "==============".to_string(),
            String::new(),
            format!("Octave: {}", octave.get().get()),
        ];
        if let Some(key) = last_key.get() {
            lines.push(format!(
                "Key:    {} ({:.2} Hz)",
                key.label(),
                key.frequency().as_f64()
            ));
        }
        if let SignalParameters::Additive(p) = session.parameters() {
            for tone in &p.tones {
                lines.push(format!("  {:>9.2} Hz  x{:.2}", tone.frequency, tone.amplitude));
            }
        }
        lines.push(String::new());
        lines.push("A-' white keys  W-P black keys  Z/X octave  SPACE play  Q quit".into());
        if let Some(status) = status {
            lines.push(status.to_string());
        }
        print_screen(&lines)
    };

    let handle_key = |session: &mut GeneratorSession, key: &KeyEvent| -> Result<KeyAction> {
        match key.code {
            KeyCode::Char('z') => octave.set(octave.get().down()),
            KeyCode::Char('x') => octave.set(octave.get().up()),
            KeyCode::Char(' ') => {
                session.enqueue_full()?;
            }
            KeyCode::Char(c) => {
                if let Some(offset) = offset_for(c) {
                    let key = PianoKey::new(offset, octave.get().get());
                    last_key.set(Some(key));
                    session.strike_key(key)?;
                }
            }
            _ => {}
        }
        Ok(KeyAction::Continue)
    };

    run_interactive(&mut session, draw, handle_key)
}
