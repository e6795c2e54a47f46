//! Common utilities for the interactive demos.

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{Write, stdout};
use std::panic;
use std::sync::Arc;
use std::time::Duration;
use tonebench::{Capabilities, CpalSink, GeneratorSession, PlaybackEvent, SignalParameters};

/// Key handling result that controls the event loop
pub enum KeyAction {
    /// Continue the event loop
    Continue,
    /// Exit the event loop
    Exit,
}

/// Opens the default output device and builds a session around it.
///
/// Logging goes to stderr through `env_logger`; set `RUST_LOG=debug` to see
/// the playback worker.
pub fn open_session(params: SignalParameters) -> Result<GeneratorSession> {
    let _ = env_logger::try_init();
    let sink = Arc::new(CpalSink::new()?);
    let capabilities = Capabilities::default().with_sink(sink);
    Ok(GeneratorSession::new(params, capabilities)?)
}

/// Runs an interactive demo in the alternate screen.
///
/// Redraws with `draw` after every handled key and whenever the playback
/// worker reports progress. Only key presses are forwarded.
pub fn run_interactive<D, K>(session: &mut GeneratorSession, draw: D, key_handler: K) -> Result<()>
where
    D: Fn(&GeneratorSession, Option<&str>) -> Result<()>,
    K: Fn(&mut GeneratorSession, &KeyEvent) -> Result<KeyAction>,
{
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(crossterm::cursor::Hide)?;

    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    draw(session, None)?;

    let result = event_loop(session, &draw, &key_handler);
    cleanup_terminal();
    session.shutdown();
    result
}

fn event_loop<D, K>(session: &mut GeneratorSession, draw: &D, key_handler: &K) -> Result<()>
where
    D: Fn(&GeneratorSession, Option<&str>) -> Result<()>,
    K: Fn(&mut GeneratorSession, &KeyEvent) -> Result<KeyAction>,
{
    loop {
        if let Some(event) = session.player().try_next_event() {
            let status = match event {
                PlaybackEvent::Started(id) => format!("playing {id}"),
                PlaybackEvent::Finished(id) => format!("finished {id}"),
                PlaybackEvent::Failed { id, error } => format!("{id} failed: {error}"),
            };
            draw(session, Some(&status))?;
        }

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key_event) = event::read()?
            && key_event.kind == KeyEventKind::Press
        {
            if is_quit_key(key_event.code) {
                return Ok(());
            }
            let status = match key_handler(session, &key_event) {
                Ok(KeyAction::Exit) => return Ok(()),
                Ok(KeyAction::Continue) => None,
                Err(e) => Some(e.to_string()),
            };
            draw(session, status.as_deref())?;
        }
    }
}

/// Clears the screen and prints `lines`, one per row.
pub fn print_screen(lines: &[String]) -> Result<()> {
    let mut stdout = stdout();
    stdout.execute(Clear(ClearType::All))?;
    stdout.execute(crossterm::cursor::MoveTo(0, 0))?;
    for line in lines {
        write!(stdout, "{line}\r\n")?;
    }
    stdout.flush()?;
    Ok(())
}

/// Selection of tenth `n` (1-based) of the signal, as drag coordinates.
#[allow(dead_code)]
pub fn tenth(session: &GeneratorSession, n: u32) -> (f64, f64) {
    let duration = session.signal().duration();
    let width = duration / 10.0;
    (width * f64::from(n - 1), width * f64::from(n))
}

/// Cleans up terminal state (cursor, alternate screen, raw mode).
fn cleanup_terminal() {
    let _ = stdout().execute(crossterm::cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Helper to check if a key code is a quit key (Q, ESC).
pub fn is_quit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}
