//! Confidence value object (0-100 scale, fractional).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A confidence estimate between 0 and 100 inclusive.
///
/// Unlike whole percentages, confidence keeps its fractional part so that
/// threshold comparisons are made on the exact computed value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Zero confidence.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new Confidence, clamping to the valid range. NaN becomes zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Creates a Confidence from a fraction (0.0 to 1.0).
    pub fn from_fraction(fraction: f64) -> Self {
        Self::new(fraction * 100.0)
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns a new confidence lowered by `points`, floored at zero.
    pub fn minus(&self, points: f64) -> Self {
        Self::new(self.0 - points)
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}
