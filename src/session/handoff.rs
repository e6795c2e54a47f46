//! What a session hands to the outside world.

use std::sync::Arc;

use crate::playback::{AudioSink, NullSink};
use crate::signals::GeneratedSignal;

/// Audio passed on to a downstream analysis window.
#[derive(Debug, Clone, PartialEq)]
pub struct Handoff {
    pub title: String,
    pub sample_rate: u32,
    pub samples: Arc<[f64]>,
    /// Seconds; `len / sample_rate` for selections.
    pub duration: f64,
}

impl Handoff {
    pub fn new(title: impl Into<String>, signal: &GeneratedSignal) -> Self {
        Self {
            title: title.into(),
            sample_rate: signal.sample_rate(),
            samples: signal.shared_samples(),
            duration: signal.duration(),
        }
    }
}

/// Opens analysis windows for handed-off audio.
pub trait WindowFactory: Send + Sync {
    fn open(&self, handoff: Handoff);
}

/// Factory used when no window system is attached; it only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullWindowFactory;

impl WindowFactory for NullWindowFactory {
    fn open(&self, handoff: Handoff) {
        log::info!(
            "no window factory for '{}' ({} samples at {} Hz)",
            handoff.title,
            handoff.samples.len(),
            handoff.sample_rate
        );
    }
}

/// Collaborators a session is built with.
#[derive(Clone)]
pub struct Capabilities {
    pub sink: Arc<dyn AudioSink>,
    pub windows: Arc<dyn WindowFactory>,
}

impl Capabilities {
    pub fn new(sink: Arc<dyn AudioSink>, windows: Arc<dyn WindowFactory>) -> Self {
        Self { sink, windows }
    }

    pub fn with_sink(mut self, sink: Arc<dyn AudioSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_windows(mut self, windows: Arc<dyn WindowFactory>) -> Self {
        self.windows = windows;
        self
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            sink: Arc::new(NullSink),
            windows: Arc::new(NullWindowFactory),
        }
    }
}
