//! Score calibration.
//!
//! Raw `[0,100]` scores map into a bounded `[35,92]` public range through
//! a fixed affine transform: neither end of the raw range is ever shown,
//! so users see neither a hopeless 0 nor a false-precision 100. The
//! bounds are product constants; parity matters more than re-derivation.

use serde::{Deserialize, Serialize};

use crate::analysis::Scores;

/// Lowest score ever reported publicly.
pub const CALIBRATED_FLOOR: f32 = 35.0;
/// Highest score ever reported publicly.
pub const CALIBRATED_CEILING: f32 = 92.0;

/// Map a raw `[0,100]` score into the public `[35,92]` range.
///
/// Monotonic non-decreasing; `calibrate(0) == 35`, `calibrate(100) == 92`.
pub fn calibrate(raw: f32) -> f32 {
    let raw = raw.clamp(0.0, 100.0);
    CALIBRATED_FLOOR + (raw / 100.0) * (CALIBRATED_CEILING - CALIBRATED_FLOOR)
}

/// The public view of the sub-scores, all calibrated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibratedScores {
    pub ats_compatibility: f32,
    pub parsing_reliability: f32,
    pub role_alignment: f32,
    pub content_quality: f32,
}

impl CalibratedScores {
    /// Calibrate every public-facing sub-score.
    pub fn from_raw(scores: &Scores) -> Self {
        Self {
            ats_compatibility: calibrate(scores.ats_compatibility),
            parsing_reliability: calibrate(scores.parsing_reliability),
            role_alignment: calibrate(scores.role_alignment),
            content_quality: calibrate(scores.content_quality),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibrate_endpoints() {
        assert_eq!(calibrate(0.0), 35.0);
        assert_eq!(calibrate(100.0), 92.0);
    }

    #[test]
    fn test_calibrate_bounded() {
        for raw in 0..=100 {
            let c = calibrate(raw as f32);
            assert!((CALIBRATED_FLOOR..=CALIBRATED_CEILING).contains(&c));
        }
    }

    #[test]
    fn test_calibrate_monotonic() {
        let mut previous = calibrate(0.0);
        for raw in 1..=100 {
            let current = calibrate(raw as f32);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_calibrate_clamps_out_of_range_input() {
        assert_eq!(calibrate(-10.0), 35.0);
        assert_eq!(calibrate(140.0), 92.0);
    }

    #[test]
    fn test_midpoint() {
        // 35 + 0.5 * 57
        assert!((calibrate(50.0) - 63.5).abs() < 0.001);
    }
}
