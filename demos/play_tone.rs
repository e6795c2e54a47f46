//! Pure tone and square wave playground.
//!
//! SPACE queues the whole signal, 1-9 preview a tenth of it (like dragging
//! over the plot), UP/DOWN change the frequency, TAB switches between the
//! pure tone and the square wave, [ and ] change the square wave's duty.
//! Press Q or ESC to quit.

mod common;

use anyhow::Result;
use common::{KeyAction, open_session, print_screen, run_interactive, tenth};
use crossterm::event::{KeyCode, KeyEvent};
use tonebench::{GeneratorSession, PureTone, SignalParameters, SquareWave};

const DURATION: f64 = 1.0;

fn retune(params: &SignalParameters, factor: f64) -> SignalParameters {
    match params {
        SignalParameters::PureTone(p) => {
            let frequency = (p.frequency * factor).clamp(20.0, 20_000.0);
            PureTone { frequency, ..*p }.into()
        }
        SignalParameters::Square(p) => {
            let frequency = (p.frequency * factor).clamp(20.0, 20_000.0);
            SquareWave { frequency, ..*p }.into()
        }
        other => other.clone(),
    }
}

fn toggle(params: &SignalParameters) -> SignalParameters {
    match params {
        SignalParameters::PureTone(p) => SquareWave::new(p.frequency).with_duration(DURATION).into(),
        SignalParameters::Square(p) => PureTone::new(p.frequency).with_duration(DURATION).into(),
        other => other.clone(),
    }
}

fn nudge_duty(params: &SignalParameters, delta: f64) -> SignalParameters {
    match params {
        SignalParameters::Square(p) => p.with_duty((p.duty + delta).clamp(0.0, 1.0)).into(),
        other => other.clone(),
    }
}

fn handle_key(session: &mut GeneratorSession, key: &KeyEvent) -> Result<KeyAction> {
    let current = session.parameters().clone();
    match key.code {
        KeyCode::Char(' ') => {
            session.enqueue_full()?;
        }
        KeyCode::Char(c @ '1'..='9') => {
            let (xmin, xmax) = tenth(session, c as u32 - '0' as u32);
            session.select(xmin, xmax)?;
        }
        KeyCode::Up => {
            session.set_parameters(retune(&current, 2f64.powf(1.0 / 12.0)))?;
        }
        KeyCode::Down => {
            session.set_parameters(retune(&current, 2f64.powf(-1.0 / 12.0)))?;
        }
        KeyCode::Tab => {
            session.set_parameters(toggle(&current))?;
        }
        KeyCode::Char('[') => {
            session.set_parameters(nudge_duty(&current, -0.05))?;
        }
        KeyCode::Char(']') => {
            session.set_parameters(nudge_duty(&current, 0.05))?;
        }
        _ => {}
    }
    Ok(KeyAction::Continue)
}

fn draw(session: &GeneratorSession, status: Option<&str>) -> Result<()> {
    let mut lines = vec![
        "Tone Playground".to_string(),
        "===============".to_string(),
        String::new(),
        format!("Signal:   {}", session.parameters().title()),
        format!(
            "Samples:  {} at {} Hz",
            session.signal().len(),
            session.signal().sample_rate()
        ),
    ];
    if let Some(selection) = session.selection() {
        lines.push(format!("Selected: {}", selection.label()));
    }
    lines.push(String::new());
    lines.push("SPACE play  1-9 preview tenth  UP/DOWN pitch  TAB wave  [ ] duty  Q quit".into());
    if let Some(status) = status {
        lines.push(String::new());
        lines.push(status.to_string());
    }
    print_screen(&lines)
}

fn main() -> Result<()> {
    let params = PureTone::new(440.0).with_duration(DURATION).into();
    let mut session = open_session(params)?;
    run_interactive(&mut session, draw, handle_key)
}
