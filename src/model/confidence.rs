//! Confidence scalar attached to every extracted fact.

use serde::{Deserialize, Serialize};

/// A `[0,1]` scalar expressing how trustworthy an extracted fact is,
/// based on its source.
///
/// Values are clamped at construction, so a `Confidence` read from the
/// model is always in range. Higher means more reliable: a machine-encoded
/// PDF link annotation sits near the top of the range, a heuristic glyph
/// match near the middle, a raw-text fallback near the bottom.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f32);

impl Confidence {
    /// Create a confidence, clamping into `[0,1]`.
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// The raw scalar.
    pub fn value(self) -> f32 {
        self.0
    }

    /// Scale by a factor, re-clamping. Used to derate heuristic finds
    /// relative to their source's base confidence.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.0 * factor)
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
