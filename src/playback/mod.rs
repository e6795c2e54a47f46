//! Serialized audio output.
//!
//! A `Player` owns one background worker that drains a FIFO queue of clips
//! into an `AudioSink`, plus a preview path that stops and restarts the
//! sink directly. Sinks are pluggable: `NullSink` discards audio, and with
//! the `device` feature `CpalSink` drives the default output device.

#[cfg(feature = "device")]
mod cpal_sink;
mod player;
mod request;
mod sink;
mod worker;

#[cfg(feature = "device")]
pub use cpal_sink::CpalSink;
pub use player::{EVENT_CAPACITY, Player};
pub use request::{PlaybackEvent, PlaybackRequest, RequestId};
pub use sink::{AudioSink, Clip, NullSink};
