//! One generator's state: its parameters, the rendered signal and the
//! current selection, wired to playback and to the analysis hand-off.

mod handoff;

pub use handoff::{Capabilities, Handoff, NullWindowFactory, WindowFactory};

use std::sync::Arc;

use crate::config::Settings;
use crate::error::Result;
use crate::music::{HarmonicSeries, PianoKey, piano_note};
use crate::playback::{Clip, Player, RequestId};
use crate::selection::Selection;
use crate::signals::{AdditiveTones, GeneratedSignal, SignalParameters};
use crate::synthesis::synthesize;

/// Drives a single generator.
///
/// The rendered signal is replaced wholesale whenever parameters change and
/// any selection on the old signal is dropped with it.
///
/// # Examples
///
/// ```
/// use tonebench::{Capabilities, GeneratorSession, PureTone};
///
/// let mut session = GeneratorSession::new(PureTone::new(440.0).into(), Capabilities::default())?;
/// let clip = session.select(0.050001, 0.100001)?.expect("span covers many samples");
/// assert_eq!(clip.len(), 2206);
/// assert_eq!(clip.samples()[0], 0.0);
/// # Ok::<(), tonebench::Error>(())
/// ```
pub struct GeneratorSession {
    params: SignalParameters,
    signal: GeneratedSignal,
    selection: Option<Selection>,
    player: Player,
    windows: Arc<dyn WindowFactory>,
    settings: Settings,
}

impl GeneratorSession {
    pub fn new(params: SignalParameters, capabilities: Capabilities) -> Result<Self> {
        Self::with_settings(params, capabilities, Settings::default())
    }

    /// Renders `params` and starts the playback worker.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` for a bad parameter set, `Error::Io` if the
    /// worker thread cannot be spawned.
    pub fn with_settings(
        params: SignalParameters,
        capabilities: Capabilities,
        settings: Settings,
    ) -> Result<Self> {
        let signal = synthesize(&params)?;
        let player = Player::with_settings(capabilities.sink, &settings)?;
        Ok(Self {
            params,
            signal,
            selection: None,
            player,
            windows: capabilities.windows,
            settings,
        })
    }

    pub fn parameters(&self) -> &SignalParameters {
        &self.params
    }

    pub fn signal(&self) -> &GeneratedSignal {
        &self.signal
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the parameters and renders a new signal.
    ///
    /// On error the previous parameters, signal and selection are kept.
    pub fn set_parameters(&mut self, params: SignalParameters) -> Result<&GeneratedSignal> {
        let signal = synthesize(&params)?;
        self.params = params;
        self.install(signal);
        Ok(&self.signal)
    }

    /// Renders the current parameters again. Noise gets a fresh realization.
    pub fn regenerate(&mut self) -> Result<&GeneratedSignal> {
        let signal = synthesize(&self.params)?;
        self.install(signal);
        Ok(&self.signal)
    }

    fn install(&mut self, signal: GeneratedSignal) {
        if self.selection.take().is_some() {
            log::debug!("selection discarded by regeneration");
        }
        log::debug!(
            "rendered '{}': {} samples at {} Hz",
            self.params.title(),
            signal.len(),
            signal.sample_rate()
        );
        self.signal = signal;
    }

    /// Handles a drag over the plotted signal: maps the span, keeps it as
    /// the current selection and previews the extracted copy.
    ///
    /// Returns the clip that was sent to the sink, or `None` when the span
    /// covers fewer than two samples (nothing is played then).
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` for non-finite coordinates; whatever the
    /// sink reports when the preview cannot start. The selection is stored
    /// even if the preview fails.
    pub fn select(&mut self, xmin: f64, xmax: f64) -> Result<Option<GeneratedSignal>> {
        let axis = self.signal.time_axis();
        self.selection = Selection::new(&axis, xmin, xmax)?;

        let Some(clip) = self.selected_signal() else {
            log::debug!("selection {xmin}..{xmax} is too short to play");
            return Ok(None);
        };
        self.player.preview(&clip)?;
        Ok(Some(clip))
    }

    /// Forgets the current selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// The selected samples, faded when the settings ask for it.
    pub fn selected_signal(&self) -> Option<GeneratedSignal> {
        let selection = self.selection.as_ref()?;
        if self.settings.fade_selections() {
            selection.extract_faded(&self.signal, self.settings.fade())
        } else {
            selection.extract(&self.signal)
        }
    }

    /// Queues the whole signal. An unplayable signal is a no-op.
    pub fn enqueue_full(&self) -> Result<Option<RequestId>> {
        if !self.signal.is_playable() {
            log::debug!("nothing to play");
            return Ok(None);
        }
        self.player.enqueue(&self.signal).map(Some)
    }

    /// Queues the current selection, if it is playable.
    pub fn enqueue_selection(&self) -> Result<Option<RequestId>> {
        match self.selected_signal() {
            Some(clip) => self.player.enqueue(Clip::from(clip)).map(Some),
            None => Ok(None),
        }
    }

    /// Silences both the queue's current clip and any preview.
    pub fn stop(&self) {
        self.player.stop();
    }

    /// What `load_to_analysis()` would hand off: the selection when one with
    /// at least two samples exists, otherwise the full signal.
    pub fn handoff(&self) -> Handoff {
        let title = self.params.title();
        match (self.selection.as_ref(), self.selected_signal()) {
            (Some(selection), Some(clip)) => {
                Handoff::new(format!("{title} {}", selection.label()), &clip)
            }
            _ => Handoff::new(title, &self.signal),
        }
    }

    /// Opens an analysis window on the selection or the full signal.
    pub fn load_to_analysis(&self) {
        let handoff = self.handoff();
        log::info!("handing off '{}'", handoff.title);
        self.windows.open(handoff);
    }

    /// Overwrites the tone slots with `series`, keeping the current timing
    /// when the session already renders additive tones.
    pub fn apply_harmonics(&mut self, series: &HarmonicSeries) -> Result<&GeneratedSignal> {
        let (duration, sample_rate) = match &self.params {
            SignalParameters::Additive(p) => (p.duration, p.sample_rate),
            _ => {
                let defaults = AdditiveTones::default();
                (defaults.duration, defaults.sample_rate)
            }
        };
        self.set_parameters(series.to_parameters(duration, sample_rate).into())
    }

    /// Strikes a piano key: loads its harmonic ladder and queues the short
    /// key tone at the session's sample rate.
    pub fn strike_key(&mut self, key: PianoKey) -> Result<RequestId> {
        log::debug!("key {} struck", key.label());
        self.apply_harmonics(&key.harmonics())?;
        let note = piano_note(key.frequency().as_f64(), self.signal.sample_rate())?;
        self.player.enqueue(note)
    }

    /// Stops playback and joins the worker.
    pub fn shutdown(&mut self) {
        self.player.stop();
        self.player.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::signals::{ColoredNoise, NoiseColor, PureTone};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Windows(Mutex<Vec<Handoff>>);

    impl WindowFactory for Windows {
        fn open(&self, handoff: Handoff) {
            self.0.lock().push(handoff);
        }
    }

    fn session_with_windows() -> (GeneratorSession, Arc<Windows>) {
        let windows = Arc::new(Windows::default());
        let capabilities = Capabilities::default().with_windows(windows.clone());
        let session = GeneratorSession::new(PureTone::new(440.0).into(), capabilities).unwrap();
        (session, windows)
    }

    #[test]
    fn test_regenerate_drops_selection() {
        let (mut session, _) = session_with_windows();
        session.select(0.01, 0.05).unwrap();
        assert!(session.selection().is_some());
        session.regenerate().unwrap();
        assert!(session.selection().is_none());
    }

    #[test]
    fn test_failed_update_keeps_state() {
        let (mut session, _) = session_with_windows();
        session.select(0.01, 0.05).unwrap();
        let bad = PureTone::new(440.0).with_duration(-1.0).into();
        assert!(matches!(
            session.set_parameters(bad),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(session.selection().is_some());
        assert_eq!(session.signal().len(), 8820);
    }

    #[test]
    fn test_zero_width_selection_plays_nothing() {
        let (mut session, _) = session_with_windows();
        assert_eq!(session.select(0.05, 0.05).unwrap(), None);
    }

    #[test]
    fn test_handoff_full_signal() {
        let (session, windows) = session_with_windows();
        session.load_to_analysis();
        let opened = windows.0.lock();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].title, "Pure Tone 440Hz");
        assert_eq!(opened[0].samples.len(), 8820);
        assert_eq!(opened[0].duration, 0.2);
    }

    #[test]
    fn test_handoff_selection() {
        let (mut session, windows) = session_with_windows();
        session.select(0.05, 0.1).unwrap();
        session.load_to_analysis();
        let opened = windows.0.lock();
        assert_eq!(opened[0].title, "Pure Tone 440Hz 00:00.050-00:00.100");
        let len = opened[0].samples.len();
        assert_eq!(opened[0].duration, len as f64 / 44_100.0);
    }

    #[test]
    fn test_noise_regenerates_new_realization() {
        let params = ColoredNoise::new(NoiseColor::White).into();
        let mut session = GeneratorSession::new(params, Capabilities::default()).unwrap();
        let first = session.signal().clone();
        let second = session.regenerate().unwrap().clone();
        assert_ne!(first.samples(), second.samples());
        assert!((second.peak() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_strike_key_loads_ladder() {
        let (mut session, _) = session_with_windows();
        session.strike_key(PianoKey::new(21, 4)).unwrap();
        match session.parameters() {
            SignalParameters::Additive(p) => {
                assert_eq!(p.tones.len(), 6);
                assert!((p.tones[0].frequency - 440.0).abs() < 1e-9);
                assert_eq!(p.sample_rate, 48_000);
            }
            other => panic!("expected additive tones, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_signal_is_not_queued() {
        let params = PureTone::new(440.0)
            .with_duration(0.0001)
            .with_sample_rate(5_000)
            .into();
        let session = GeneratorSession::new(params, Capabilities::default()).unwrap();
        assert_eq!(session.enqueue_full().unwrap(), None);
    }
}
