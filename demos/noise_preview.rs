//! Colored noise explorer.
//!
//! W/P/B pick white, pink or brown noise, R draws a new realization,
//! SPACE queues the full signal and 1-9 preview a tenth of it.
//! Press Q or ESC to quit.

mod common;

use anyhow::Result;
use common::{KeyAction, open_session, print_screen, run_interactive, tenth};
use crossterm::event::{KeyCode, KeyEvent};
use tonebench::analysis::Spectrum;
use tonebench::{ColoredNoise, GeneratorSession, NoiseColor, SignalParameters};

fn with_color(params: &SignalParameters, color: NoiseColor) -> SignalParameters {
    match params {
        SignalParameters::Noise(p) => ColoredNoise { color, ..*p }.into(),
        other => other.clone(),
    }
}

fn handle_key(session: &mut GeneratorSession, key: &KeyEvent) -> Result<KeyAction> {
    let current = session.parameters().clone();
    match key.code {
        KeyCode::Char('w') => {
            session.set_parameters(with_color(&current, NoiseColor::White))?;
        }
        KeyCode::Char('p') => {
            session.set_parameters(with_color(&current, NoiseColor::Pink))?;
        }
        KeyCode::Char('b') => {
            session.set_parameters(with_color(&current, NoiseColor::Brown))?;
        }
        KeyCode::Char('r') => {
            session.regenerate()?;
        }
        KeyCode::Char(' ') => {
            session.enqueue_full()?;
        }
        KeyCode::Char(c @ '1'..='9') => {
            let (xmin, xmax) = tenth(session, c as u32 - '0' as u32);
            session.select(xmin, xmax)?;
        }
        _ => {}
    }
    Ok(KeyAction::Continue)
}

/// Average level in dB of the low and high quarter of the spectrum.
fn tilt(session: &GeneratorSession) -> Option<(f64, f64)> {
    let spectrum = Spectrum::analyze(session.signal().samples(), session.signal().sample_rate()).ok()?;
    let db = spectrum.magnitudes_db();
    let quarter = db.len() / 4;
    if quarter == 0 {
        return None;
    }
    let mean = |s: &[f64]| s.iter().sum::<f64>() / s.len() as f64;
    Some((mean(&db[1..=quarter]), mean(&db[db.len() - quarter..])))
}

fn draw(session: &GeneratorSession, status: Option<&str>) -> Result<()> {
    let mut lines = vec![
        "Noise Explorer".to_string(),
        "==============".to_string(),
        String::new(),
        format!("Signal: {}", session.parameters().title()),
        format!("Peak:   {:.3}", session.signal().peak()),
    ];
    if let Some((low, high)) = tilt(session) {
        lines.push(format!("Low band {low:.1} dB, high band {high:.1} dB"));
    }
    if let Some(selection) = session.selection() {
        lines.push(format!("Selected: {}", selection.label()));
    }
    lines.push(String::new());
    lines.push("W/P/B color  R redraw  SPACE play  1-9 preview tenth  Q quit".into());
    if let Some(status) = status {
        lines.push(status.to_string());
    }
    print_screen(&lines)
}

fn main() -> Result<()> {
    let mut session = open_session(ColoredNoise::default().into())?;
    run_interactive(&mut session, draw, handle_key)
}
