//! Messages exchanged with the playback worker.

use std::fmt;

use super::sink::Clip;

/// Identifies one queued playback request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub(crate) u64);

impl RequestId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A clip waiting in the FIFO queue. Consumed exactly once.
#[derive(Debug, Clone)]
pub struct PlaybackRequest {
    pub id: RequestId,
    pub clip: Clip,
}

/// Progress reported by the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    Started(RequestId),
    Finished(RequestId),
    /// The device failed; the worker carries on with the next request.
    Failed { id: RequestId, error: String },
}

impl PlaybackEvent {
    pub fn id(&self) -> RequestId {
        match self {
            PlaybackEvent::Started(id) | PlaybackEvent::Finished(id) => *id,
            PlaybackEvent::Failed { id, .. } => *id,
        }
    }
}

/// What travels down the worker's channel.
#[derive(Debug)]
pub(crate) enum WorkerMessage {
    Request(PlaybackRequest),
    Shutdown,
}
