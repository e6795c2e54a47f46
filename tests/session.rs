mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Call, RecordingSink};
use parking_lot::Mutex;
use tonebench::{
    Capabilities, GeneratorSession, Handoff, PianoKey, PureTone, SignalParameters, SquareWave,
    WindowFactory,
};

#[derive(Default)]
struct RecordingWindows(Mutex<Vec<Handoff>>);

impl WindowFactory for RecordingWindows {
    fn open(&self, handoff: Handoff) {
        self.0.lock().push(handoff);
    }
}

fn session(params: SignalParameters) -> (GeneratorSession, Arc<RecordingSink>, Arc<RecordingWindows>) {
    let sink = Arc::new(RecordingSink::new(Duration::from_millis(5)));
    let windows = Arc::new(RecordingWindows::default());
    let capabilities = Capabilities::new(sink.clone(), windows.clone());
    (GeneratorSession::new(params, capabilities).unwrap(), sink, windows)
}

#[test]
fn test_selection_previews_faded_copy() {
    let (mut session, sink, _) = session(SquareWave::new(220.0).into());
    let before = session.signal().clone();

    let clip = session.select(0.1, 0.2).unwrap().unwrap();

    assert_eq!(clip.samples()[0], 0.0);
    assert_eq!(*clip.samples().last().unwrap(), 0.0);
    assert_eq!(session.signal(), &before);
    assert_eq!(sink.calls(), vec![Call::Stop, Call::Start(clip.len())]);
}

#[test]
fn test_reversed_drag_is_ordered() {
    let (mut session, _, _) = session(PureTone::new(440.0).into());
    session.select(0.15, 0.05).unwrap();
    let selection = session.selection().unwrap();
    assert_eq!(selection.start_time(), 0.05);
    assert_eq!(selection.end_time(), 0.15);
}

#[test]
fn test_non_finite_drag_is_rejected() {
    let (mut session, sink, _) = session(PureTone::new(440.0).into());
    assert!(session.select(f64::NAN, 0.1).is_err());
    assert!(sink.calls().is_empty());
}

#[test]
fn test_enqueue_full_plays_whole_signal() {
    let (mut session, sink, _) = session(PureTone::new(440.0).into());
    let len = session.signal().len();
    session.enqueue_full().unwrap();
    session.shutdown();
    assert_eq!(sink.plays(), vec![Call::PlayBegin(len), Call::PlayEnd(len)]);
}

#[test]
fn test_handoff_prefers_selection() {
    let (mut session, _, windows) = session(SquareWave::new(440.0).with_duty(0.25).into());

    session.load_to_analysis();
    session.select(0.0, 0.1).unwrap();
    session.load_to_analysis();
    session.regenerate().unwrap();
    session.load_to_analysis();

    let opened = windows.0.lock();
    assert_eq!(opened.len(), 3);
    assert_eq!(opened[0].title, "Square Wave 440Hz (Duty: 0.25)");
    assert_eq!(opened[0].samples.len(), 8820);
    assert_eq!(opened[1].title, "Square Wave 440Hz (Duty: 0.25) 00:00.000-00:00.100");
    assert_eq!(
        opened[1].duration,
        opened[1].samples.len() as f64 / f64::from(opened[1].sample_rate)
    );
    assert_eq!(opened[2].title, "Square Wave 440Hz (Duty: 0.25)");
}

#[test]
fn test_struck_key_is_queued() {
    let (mut session, sink, _) = session(PureTone::new(440.0).into());
    session.strike_key(PianoKey::new(21, 4)).unwrap();
    session.shutdown();
    // 0.5 s at 48 kHz
    assert_eq!(sink.plays(), vec![Call::PlayBegin(24_000), Call::PlayEnd(24_000)]);
}
