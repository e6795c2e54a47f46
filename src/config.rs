//! Runtime settings for sessions and the playback worker.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::envelopes::{Curve, FadeEnvelope};

/// Name given to the playback worker thread unless overridden.
pub const DEFAULT_WORKER_NAME: &str = "playback";

/// Knobs shared by `GeneratorSession` and `Player`.
///
/// # Examples
///
/// ```
/// use tonebench::Settings;
///
/// let settings = Settings::default()
///     .with_fade_secs(0.01)
///     .with_queue_capacity(8);
/// assert_eq!(settings.queue_capacity(), Some(8));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    fade: FadeEnvelope,
    fade_selections: bool,
    worker_thread_name: String,
    queue_capacity: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fade: FadeEnvelope::default(),
            fade_selections: true,
            worker_thread_name: DEFAULT_WORKER_NAME.to_string(),
            queue_capacity: None,
        }
    }
}

impl Settings {
    /// Length of the fade applied to each end of a selection.
    pub fn with_fade_secs(mut self, seconds: f64) -> Self {
        self.fade = FadeEnvelope::new(seconds).with_curve(self.fade.curve());
        self
    }

    /// Shape of the selection fade.
    pub fn with_fade_curve(mut self, curve: Curve) -> Self {
        self.fade = self.fade.with_curve(curve);
        self
    }

    /// Whether selections are faded before they are previewed or handed off.
    pub fn with_fade_selections(mut self, enabled: bool) -> Self {
        self.fade_selections = enabled;
        self
    }

    pub fn with_worker_thread_name(mut self, name: impl Into<String>) -> Self {
        self.worker_thread_name = name.into();
        self
    }

    /// Caps the number of pending requests. A capacity of zero is treated as one.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity.max(1));
        self
    }

    /// Lets the queue grow without limit (the default).
    pub fn with_unbounded_queue(mut self) -> Self {
        self.queue_capacity = None;
        self
    }

    pub fn fade(&self) -> &FadeEnvelope {
        &self.fade
    }

    pub fn fade_selections(&self) -> bool {
        self.fade_selections
    }

    pub fn worker_thread_name(&self) -> &str {
        &self.worker_thread_name
    }

    pub fn queue_capacity(&self) -> Option<usize> {
        self.queue_capacity
    }
}
