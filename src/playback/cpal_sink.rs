//! Output through the default cpal device.
//!
//! cpal streams cannot leave the thread that built them, so a dedicated
//! device thread owns the device and the current stream. `CpalSink` talks
//! to it over a channel and waits on a `Completion` for blocking playback.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SampleRate, SizedSample, StreamConfig};
use parking_lot::{Condvar, Mutex};

use crate::error::{Error, Result};

use super::sink::{AudioSink, Clip};

/// How often the idle device thread checks for finished streams.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Slack added to a clip's length before a blocked `play()` gives up.
const PLAY_GRACE: Duration = Duration::from_secs(2);

/// Outcome of one clip, shared between the stream callbacks and waiters.
struct Completion {
    done: AtomicBool,
    outcome: Mutex<Option<std::result::Result<(), String>>>,
    cond: Condvar,
}

impl Completion {
    fn new() -> Self {
        Self {
            done: AtomicBool::new(false),
            outcome: Mutex::new(None),
            cond: Condvar::new(),
        }
    }

    fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// First call wins.
    fn finish(&self, outcome: std::result::Result<(), String>) {
        let mut slot = self.outcome.lock();
        if slot.is_none() {
            *slot = Some(outcome);
            self.done.store(true, Ordering::Release);
            self.cond.notify_all();
        }
    }

    /// Waits for the outcome until `timeout` has elapsed in total.
    fn wait(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let mut slot = self.outcome.lock();
        loop {
            if let Some(outcome) = slot.as_ref() {
                return outcome.clone().map_err(Error::Playback);
            }
            if self.cond.wait_until(&mut slot, deadline).timed_out() {
                return Err(Error::Playback("timed out waiting for the device".into()));
            }
        }
    }
}

enum DeviceCommand {
    Start {
        clip: Clip,
        reply: Sender<Result<Arc<Completion>>>,
    },
    Stop,
}

/// `AudioSink` backed by the system's default output device.
///
/// Each clip gets its own stream opened at the clip's sample rate; mono
/// samples are copied to every output channel. Rates the device does not
/// support are reported as `Error::DeviceUnavailable` rather than resampled.
pub struct CpalSink {
    commands: Mutex<Option<Sender<DeviceCommand>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl CpalSink {
    /// Opens the default output device on a new device thread.
    ///
    /// # Errors
    ///
    /// `Error::DeviceUnavailable` when the host has no output device.
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("cpal-device".into())
            .spawn(move || {
                let host = cpal::default_host();
                let Some(device) = host.default_output_device() else {
                    let _ = ready_tx.send(Err(Error::DeviceUnavailable(
                        "no output device available".into(),
                    )));
                    return;
                };
                if let Ok(name) = device.name() {
                    log::info!("using output device '{name}'");
                }
                let _ = ready_tx.send(Ok(()));
                run_device(&device, rx);
            })?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                commands: Mutex::new(Some(tx)),
                handle: Mutex::new(Some(handle)),
            }),
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                let _ = handle.join();
                Err(Error::DeviceUnavailable("device thread exited".into()))
            }
        }
    }

    fn send(&self, command: DeviceCommand) -> Result<()> {
        let guard = self.commands.lock();
        let tx = guard
            .as_ref()
            .ok_or_else(|| Error::DeviceUnavailable("device closed".into()))?;
        tx.send(command)
            .map_err(|_| Error::DeviceUnavailable("device thread exited".into()))
    }

    fn begin(&self, clip: &Clip) -> Result<Arc<Completion>> {
        let (reply, response) = mpsc::channel();
        self.send(DeviceCommand::Start {
            clip: clip.clone(),
            reply,
        })?;
        response
            .recv()
            .map_err(|_| Error::DeviceUnavailable("device thread exited".into()))?
    }
}

impl AudioSink for CpalSink {
    fn play(&self, clip: &Clip) -> Result<()> {
        let completion = self.begin(clip)?;
        completion.wait(Duration::from_secs_f64(clip.duration()) + PLAY_GRACE)
    }

    fn start(&self, clip: &Clip) -> Result<()> {
        self.begin(clip).map(|_| ())
    }

    fn stop(&self) {
        if self.send(DeviceCommand::Stop).is_err() {
            log::debug!("stop ignored, device already closed");
        }
    }
}

impl Drop for CpalSink {
    fn drop(&mut self) {
        drop(self.commands.lock().take());
        if let Some(handle) = self.handle.lock().take() {
            let _ = handle.join();
        }
    }
}

struct Active {
    stream: cpal::Stream,
    completion: Arc<Completion>,
}

impl Active {
    fn stop(self) {
        drop(self.stream);
        self.completion.finish(Ok(()));
    }
}

fn run_device(device: &cpal::Device, rx: Receiver<DeviceCommand>) {
    let mut current: Option<Active> = None;

    loop {
        match rx.recv_timeout(IDLE_POLL) {
            Ok(DeviceCommand::Start { clip, reply }) => {
                if let Some(active) = current.take() {
                    active.stop();
                }
                let opened = open_stream(device, &clip).inspect_err(|e| {
                    log::error!("failed to open output stream: {e}");
                });
                let response = match opened {
                    Ok(active) => {
                        let completion = Arc::clone(&active.completion);
                        current = Some(active);
                        Ok(completion)
                    }
                    Err(e) => Err(e),
                };
                let _ = reply.send(response);
            }
            Ok(DeviceCommand::Stop) => {
                if let Some(active) = current.take() {
                    log::debug!("stopping current clip");
                    active.stop();
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if current.as_ref().is_some_and(|a| a.completion.is_done()) {
                    current = None;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    if let Some(active) = current.take() {
        active.stop();
    }
    log::debug!("device thread stopped");
}

fn open_stream(device: &cpal::Device, clip: &Clip) -> Result<Active> {
    let rate = SampleRate(clip.sample_rate());
    let supported = device
        .supported_output_configs()
        .map_err(|e| Error::DeviceUnavailable(e.to_string()))?
        .filter(|range| range.min_sample_rate() <= rate && rate <= range.max_sample_rate())
        .filter(|range| {
            matches!(
                range.sample_format(),
                SampleFormat::F32 | SampleFormat::I16 | SampleFormat::U16
            )
        })
        .max_by_key(|range| range.sample_format() == SampleFormat::F32)
        .ok_or_else(|| {
            Error::DeviceUnavailable(format!(
                "device does not support {} Hz output",
                clip.sample_rate()
            ))
        })?
        .with_sample_rate(rate);

    let config: StreamConfig = supported.config();
    let completion = Arc::new(Completion::new());
    let stream = match supported.sample_format() {
        SampleFormat::F32 => build_stream::<f32>(device, &config, clip, &completion)?,
        SampleFormat::I16 => build_stream::<i16>(device, &config, clip, &completion)?,
        SampleFormat::U16 => build_stream::<u16>(device, &config, clip, &completion)?,
        other => {
            return Err(Error::DeviceUnavailable(format!(
                "unsupported sample format: {other}"
            )));
        }
    };
    stream
        .play()
        .map_err(|e| Error::DeviceUnavailable(e.to_string()))?;

    Ok(Active { stream, completion })
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    clip: &Clip,
    completion: &Arc<Completion>,
) -> Result<cpal::Stream>
where
    T: Sample + FromSample<f64> + SizedSample,
{
    let channels = usize::from(config.channels);
    let samples = clip.shared_samples();
    let mut position = 0;
    let finished = Arc::clone(completion);
    let failed = Arc::clone(completion);

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                for frame in data.chunks_mut(channels) {
                    let value = samples.get(position).copied().unwrap_or(0.0);
                    position += 1;
                    let value: T = T::from_sample(value);
                    for s in frame.iter_mut() {
                        *s = value;
                    }
                }
                if position >= samples.len() && !finished.is_done() {
                    finished.finish(Ok(()));
                }
            },
            move |err| {
                log::error!("audio stream error: {err}");
                failed.finish(Err(err.to_string()));
            },
            None,
        )
        .map_err(|e| Error::DeviceUnavailable(e.to_string()))
}
