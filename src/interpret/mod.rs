//! Calibration and interpretation: the only layer end users see.
//!
//! Maps raw scores into the bounded public range, rewrites internal
//! findings into softened, severity-tagged messages, derives positive
//! highlights, and attaches the parsing-context banner. Pure function of
//! the analysis result: identical input yields byte-identical output.

mod calibrate;
mod messages;

pub use calibrate::{calibrate, CalibratedScores, CALIBRATED_CEILING, CALIBRATED_FLOOR};
pub use messages::{
    derive_highlights, parsing_context, soften_issue, soften_verdict, CalibratedMessage,
    ParsingContext, ParsingStatus, Severity,
};

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;

/// The public, calibrated artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpretationResult {
    /// Calibrated composite strength, `[35,92]`.
    pub overall_strength: f32,
    /// Supportive verdict prose.
    pub user_verdict: String,
    /// Calibrated sub-scores.
    pub calibrated_scores: CalibratedScores,
    /// Positive observations, independent of improvements.
    pub highlights: Vec<String>,
    /// Softened findings, most severe first.
    pub improvements: Vec<CalibratedMessage>,
    /// Banner describing how reliably the document parsed.
    pub parsing_context: ParsingContext,
}

/// Interpret a raw analysis result for end users.
pub fn interpret(analysis: &AnalysisResult) -> InterpretationResult {
    let calibrated_scores = CalibratedScores::from_raw(&analysis.scores);

    let mut improvements: Vec<CalibratedMessage> =
        analysis.issues.iter().map(soften_issue).collect();
    improvements.sort_by_key(|m| match m.severity {
        Severity::Critical => 0u8,
        Severity::Warning => 1,
        Severity::Info => 2,
    });

    InterpretationResult {
        overall_strength: calibrated_scores.ats_compatibility,
        user_verdict: soften_verdict(analysis.verdict).to_string(),
        calibrated_scores,
        highlights: derive_highlights(analysis),
        improvements,
        parsing_context: parsing_context(analysis.scores.parsing_reliability),
    }
}
