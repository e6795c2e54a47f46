//! Mapping drag selections on a plotted waveform to sample ranges.
//!
//! A selection arrives as two time coordinates. Each is mapped to the first
//! sample whose time is not less than it, giving an inclusive index range;
//! coordinates outside the axis clamp to the first or last sample.

mod span;

pub use span::{SampleRange, Selection, format_timestamp, map_span_to_samples};
