//! Handle to the playback worker plus the direct preview path.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, SendError, Sender, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::Settings;
use crate::error::{Error, Result};

use super::request::{PlaybackEvent, PlaybackRequest, RequestId, WorkerMessage};
use super::sink::{AudioSink, Clip};
use super::worker::Worker;

/// Worker events retained for the owner before further ones are dropped.
pub const EVENT_CAPACITY: usize = 256;

const STOP_POLL: Duration = Duration::from_millis(10);

enum QueueSender {
    Unbounded(Sender<WorkerMessage>),
    Bounded {
        tx: SyncSender<WorkerMessage>,
        capacity: usize,
    },
}

impl QueueSender {
    /// Never blocks.
    fn try_send(&self, message: WorkerMessage) -> Result<()> {
        match self {
            QueueSender::Unbounded(tx) => tx.send(message).map_err(|_| Error::WorkerTerminated),
            QueueSender::Bounded { tx, capacity } => match tx.try_send(message) {
                Ok(()) => Ok(()),
                Err(TrySendError::Full(_)) => Err(Error::QueueFull(*capacity)),
                Err(TrySendError::Disconnected(_)) => Err(Error::WorkerTerminated),
            },
        }
    }

    /// Blocks on a full bounded queue.
    fn send(&self, message: WorkerMessage) -> std::result::Result<(), SendError<WorkerMessage>> {
        match self {
            QueueSender::Unbounded(tx) => tx.send(message),
            QueueSender::Bounded { tx, .. } => tx.send(message),
        }
    }
}

/// Serialized playback on one output device.
///
/// Two paths reach the sink:
///
/// - `enqueue()` hands a clip to a dedicated worker thread. Queued clips play
///   one after another in submission order and never overlap.
/// - `preview()` skips the queue. It stops whatever is sounding and starts
///   the new clip at once without blocking the caller. The latest preview
///   always wins, truncating an earlier one.
///
/// Worker events are buffered up to [`EVENT_CAPACITY`]; once the buffer is
/// full, newer events are dropped until the owner drains it.
///
/// After `shutdown()` the queue rejects new requests with
/// `Error::WorkerTerminated`. Dropping the player skips any requests still
/// pending, stops the device and joins the worker.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tonebench::{Clip, NullSink, Player};
///
/// let mut player = Player::new(Arc::new(NullSink)).unwrap();
/// let id = player.enqueue(Clip::new(vec![0.0; 64].into(), 8000)).unwrap();
/// player.shutdown();
/// assert!(player.enqueue(Clip::new(vec![0.0; 64].into(), 8000)).is_err());
/// # let _ = id;
/// ```
pub struct Player {
    sink: Arc<dyn AudioSink>,
    tx: Mutex<Option<QueueSender>>,
    handle: Mutex<Option<JoinHandle<()>>>,
    events: Mutex<Receiver<PlaybackEvent>>,
    abort: Arc<AtomicBool>,
    next_id: AtomicU64,
}

impl Player {
    /// Spawns the worker with default settings.
    pub fn new(sink: Arc<dyn AudioSink>) -> Result<Self> {
        Self::with_settings(sink, &Settings::default())
    }

    /// Spawns the worker thread, named and bounded per `settings`.
    ///
    /// # Errors
    ///
    /// `Error::Io` if the operating system refuses to create the thread.
    pub fn with_settings(sink: Arc<dyn AudioSink>, settings: &Settings) -> Result<Self> {
        let (events_tx, events_rx) = mpsc::sync_channel(EVENT_CAPACITY);
        let abort = Arc::new(AtomicBool::new(false));

        let (tx, rx) = match settings.queue_capacity() {
            Some(capacity) => {
                let (tx, rx) = mpsc::sync_channel(capacity);
                (QueueSender::Bounded { tx, capacity }, rx)
            }
            None => {
                let (tx, rx) = mpsc::channel();
                (QueueSender::Unbounded(tx), rx)
            }
        };

        let worker = Worker {
            rx,
            sink: Arc::clone(&sink),
            events: events_tx,
            abort: Arc::clone(&abort),
        };
        let handle = thread::Builder::new()
            .name(settings.worker_thread_name().to_string())
            .spawn(move || worker.run())?;

        log::info!(
            "playback worker '{}' started",
            settings.worker_thread_name()
        );

        Ok(Self {
            sink,
            tx: Mutex::new(Some(tx)),
            handle: Mutex::new(Some(handle)),
            events: Mutex::new(events_rx),
            abort,
            next_id: AtomicU64::new(1),
        })
    }

    /// Queues `clip` behind any pending requests and returns immediately.
    ///
    /// # Errors
    ///
    /// - `Error::WorkerTerminated` after `shutdown()`.
    /// - `Error::QueueFull` when a bounded queue has no room.
    pub fn enqueue(&self, clip: impl Into<Clip>) -> Result<RequestId> {
        let clip = clip.into();
        let guard = self.tx.lock();
        let Some(tx) = guard.as_ref() else {
            log::warn!("playback requested after shutdown");
            return Err(Error::WorkerTerminated);
        };

        let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        log::debug!("queueing request {id} ({} samples)", clip.len());
        tx.try_send(WorkerMessage::Request(PlaybackRequest { id, clip }))?;
        Ok(id)
    }

    /// Stops the current sound and starts `clip` immediately.
    ///
    /// Does not touch the queue; a queued clip that gets stopped ends early
    /// and the worker moves on to the next one.
    ///
    /// # Errors
    ///
    /// Whatever the sink reports when starting, typically
    /// `Error::DeviceUnavailable`.
    pub fn preview(&self, clip: impl Into<Clip>) -> Result<()> {
        let clip = clip.into();
        self.sink.stop();
        self.sink.start(&clip).inspect_err(|e| {
            log::error!("preview failed: {e}");
        })
    }

    /// Silences whatever is playing, on either path.
    pub fn stop(&self) {
        self.sink.stop();
    }

    /// Sends the shutdown message and waits for the worker to exit.
    ///
    /// Requests queued before the call still play. Calling this twice is a
    /// no-op.
    pub fn shutdown(&mut self) {
        let tx = self.tx.lock().take();
        if let Some(tx) = tx {
            if tx.send(WorkerMessage::Shutdown).is_err() {
                log::warn!("playback worker exited before shutdown");
            }
        }
        self.join();
    }

    /// True while the worker thread is alive.
    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Next worker event, if one is waiting.
    pub fn try_next_event(&self) -> Option<PlaybackEvent> {
        self.events.lock().try_recv().ok()
    }

    /// Waits up to `timeout` for the next worker event.
    pub fn next_event_timeout(&self, timeout: Duration) -> Option<PlaybackEvent> {
        self.events.lock().recv_timeout(timeout).ok()
    }

    /// The sink both paths write to.
    pub fn sink(&self) -> &Arc<dyn AudioSink> {
        &self.sink
    }

    fn join(&self) {
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                log::error!("playback worker panicked");
            } else {
                log::info!("playback worker joined");
            }
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.abort.store(true, Ordering::Release);
        self.sink.stop();
        // Closing the channel ends the loop once the skipped requests drain.
        drop(self.tx.lock().take());
        // A clip that reached the sink after the first stop is cut here.
        while self.is_running() {
            self.sink.stop();
            thread::sleep(STOP_POLL);
        }
        self.join();
    }
}
