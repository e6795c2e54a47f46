//! Gain curves for fades.
//!
//! A curve maps normalized progress `t` in [0, 1] to a gain in [0, 1].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of a fade ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Curve {
    /// Gain rises at a constant rate
    Linear,

    /// `t^exponent`; `2.0` is the quadratic ramp used for click-free fades
    Power(f64),

    /// Smoothstep ease-in/ease-out
    SCurve,
}

impl Default for Curve {
    fn default() -> Self {
        Curve::Power(2.0)
    }
}

impl Curve {
    /// Gain at progress `t`, which is clamped to [0, 1].
    ///
    /// # Examples
    ///
    /// ```
    /// use tonebench::envelopes::Curve;
    ///
    /// assert_eq!(Curve::Power(2.0).apply(0.5), 0.25);
    /// assert_eq!(Curve::Linear.apply(1.5), 1.0);
    /// ```
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => t,
            Curve::Power(exponent) => t.powf(*exponent),
            Curve::SCurve => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Gain of step `index` in a ramp of `len` steps: `apply(index / len)`.
    ///
    /// The ramp starts at exactly zero and stops one step short of unity,
    /// so the first sample after the ramp keeps its full level.
    pub fn ramp_gain(&self, index: usize, len: usize) -> f64 {
        if len == 0 {
            return 1.0;
        }
        self.apply(index as f64 / len as f64)
    }
}
