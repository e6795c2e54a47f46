//! The background loop that drains the playback queue.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, SyncSender, TrySendError};

use super::request::{PlaybackEvent, PlaybackRequest, WorkerMessage};
use super::sink::AudioSink;

/// State owned by the worker thread.
pub(crate) struct Worker {
    pub(crate) rx: Receiver<WorkerMessage>,
    pub(crate) sink: Arc<dyn AudioSink>,
    pub(crate) events: SyncSender<PlaybackEvent>,
    /// Set when the owner is dropped; remaining requests are skipped.
    pub(crate) abort: Arc<AtomicBool>,
}

impl Worker {
    /// Processes requests in arrival order until the shutdown message
    /// arrives or every sender is gone.
    pub(crate) fn run(self) {
        log::debug!("playback worker waiting for requests");

        while let Ok(message) = self.rx.recv() {
            match message {
                WorkerMessage::Request(request) => {
                    if self.abort.load(Ordering::Acquire) {
                        log::debug!("skipping playback request {} after abort", request.id);
                        continue;
                    }
                    self.process(request);
                }
                WorkerMessage::Shutdown => {
                    log::debug!("playback worker received shutdown");
                    break;
                }
            }
        }

        log::debug!("playback worker stopped");
    }

    fn process(&self, request: PlaybackRequest) {
        let PlaybackRequest { id, clip } = request;
        // The owner may have stopped the sink between dequeue and here
        if self.abort.load(Ordering::Acquire) {
            log::debug!("request {id} aborted before reaching the sink");
            return;
        }

        log::info!(
            "playing request {id}: {} samples at {} Hz",
            clip.len(),
            clip.sample_rate()
        );
        self.emit(PlaybackEvent::Started(id));

        match self.sink.play(&clip) {
            Ok(()) => {
                log::debug!("request {id} finished");
                self.emit(PlaybackEvent::Finished(id));
            }
            Err(e) => {
                log::error!("playback of request {id} failed: {e}");
                self.emit(PlaybackEvent::Failed {
                    id,
                    error: e.to_string(),
                });
            }
        }
    }

    fn emit(&self, event: PlaybackEvent) {
        match self.events.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                log::debug!("event buffer full, dropping {event:?}");
            }
            // Nobody listening is fine.
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}
