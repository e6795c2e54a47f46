//! Signal types shared by every part of the crate.
//!
//! This module provides:
//! - `Signal` trait for per-sample generators and `SampleClock` to drive them
//! - `GeneratedSignal`, the immutable rendered buffer, and its `TimeAxis`
//! - Parameter sets for each signal family, with validation

mod core;
mod generated;
mod params;

pub use core::{SampleClock, Signal};
pub use generated::{GeneratedSignal, TimeAxis};
pub use params::{
    AdditiveTones, ColoredNoise, MAX_SAMPLE_RATE, MAX_SAMPLES, MAX_TONES, NoiseColor, PureTone,
    SignalParameters, SquareWave, Tone,
};
