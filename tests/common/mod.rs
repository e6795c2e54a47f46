//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tonebench::{AudioSink, Clip, Error, Result};

/// One call observed by `RecordingSink`, keyed by clip length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    PlayBegin(usize),
    PlayEnd(usize),
    Start(usize),
    Stop,
}

#[derive(Default)]
struct State {
    calls: Vec<(Call, Instant)>,
    stops: u64,
}

/// Mock device that records every call with a timestamp.
///
/// `play()` holds the "device" for `play_time` unless `stop()` interrupts it.
pub struct RecordingSink {
    state: Mutex<State>,
    wake: Condvar,
    play_time: Duration,
    fail_len: Option<usize>,
}

impl RecordingSink {
    pub fn new(play_time: Duration) -> Self {
        Self {
            state: Mutex::new(State::default()),
            wake: Condvar::new(),
            play_time,
            fail_len: None,
        }
    }

    /// Makes `play()` fail for clips of exactly `len` samples.
    pub fn failing_on(mut self, len: usize) -> Self {
        self.fail_len = Some(len);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.iter().map(|(c, _)| *c).collect()
    }

    pub fn timed_calls(&self) -> Vec<(Call, Instant)> {
        self.state.lock().calls.clone()
    }

    /// Only the blocking-play calls, in order.
    pub fn plays(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::PlayBegin(_) | Call::PlayEnd(_)))
            .collect()
    }

    /// Polls until `call` has been recorded or `timeout` passes.
    pub fn wait_for(&self, call: Call, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.calls().contains(&call) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        false
    }
}

impl AudioSink for RecordingSink {
    fn play(&self, clip: &Clip) -> Result<()> {
        let len = clip.len();
        let mut state = self.state.lock();
        let stops_at_begin = state.stops;
        state.calls.push((Call::PlayBegin(len), Instant::now()));
        if self.fail_len == Some(len) {
            return Err(Error::DeviceUnavailable("mock device busy".into()));
        }

        let deadline = Instant::now() + self.play_time;
        while state.stops == stops_at_begin {
            if self.wake.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }
        state.calls.push((Call::PlayEnd(len), Instant::now()));
        Ok(())
    }

    fn start(&self, clip: &Clip) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push((Call::Start(clip.len()), Instant::now()));
        Ok(())
    }

    fn stop(&self) {
        let mut state = self.state.lock();
        state.stops += 1;
        state.calls.push((Call::Stop, Instant::now()));
        self.wake.notify_all();
    }
}

pub fn clip(len: usize) -> Clip {
    Clip::new(vec![0.1; len].into(), 8000)
}
