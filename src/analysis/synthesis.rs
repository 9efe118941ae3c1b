//! Score synthesis: sub-scores into a composite and a verdict.
//!
//! Weights and band thresholds are fixed constants so behavior is
//! reproducible run to run; nothing here is learned or tuned at runtime.

use serde::{Deserialize, Serialize};

use crate::model::SectionKind;

use super::issue::{Evidence, Issue, IssueCategory, IssueKind};
use super::keywords::KeywordMode;
use super::structural::StructuralSignals;
use super::AtsOutcome;

/// Composite weight: parsing reliability.
const WEIGHT_PARSING: f32 = 0.25;
/// Composite weight: role/keyword alignment.
const WEIGHT_ROLE: f32 = 0.25;
/// Composite weight: bullet content quality.
const WEIGHT_CONTENT: f32 = 0.25;
/// Composite weight: essential-section coverage.
const WEIGHT_SECTIONS: f32 = 0.15;
/// Composite weight: contact validity.
const WEIGHT_CONTACT: f32 = 0.10;

/// Composite at or above this passes.
const PASS_THRESHOLD: f32 = 70.0;
/// Composite at or above this (but under pass) is a weak pass.
const WEAK_PASS_THRESHOLD: f32 = 50.0;

/// Parsing reliability below this adds a layout warning to the issue
/// list (the interpretation layer also raises its banner independently).
const PARSING_WARNING_BELOW: f32 = 60.0;

/// Coarse screening outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    WeakPass,
    Fail,
}

impl Verdict {
    /// Band a composite score; lower bounds are inclusive.
    fn from_composite(composite: f32) -> Self {
        if composite >= PASS_THRESHOLD {
            Verdict::Pass
        } else if composite >= WEAK_PASS_THRESHOLD {
            Verdict::WeakPass
        } else {
            Verdict::Fail
        }
    }

    /// Cap at weak pass; a hard failure cannot coexist with a pass.
    fn capped(self) -> Self {
        match self {
            Verdict::Pass => Verdict::WeakPass,
            other => other,
        }
    }
}

/// Raw, uncalibrated sub-scores, all `[0,100]`. These are pass-through
/// values: the calibration layer is the single place the public-facing
/// transform is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scores {
    /// Weighted composite of the other sub-scores.
    pub ats_compatibility: f32,
    pub parsing_reliability: f32,
    pub role_alignment: f32,
    pub content_quality: f32,
    pub section_coverage: f32,
    pub contact_score: f32,
}

/// Aggregate bullet rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletRates {
    pub metrics_rate: f32,
    pub action_verb_rate: f32,
    pub bullet_count: usize,
}

/// Section summary for downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionsSummary {
    pub detected: Vec<SectionKind>,
    pub headers_recognized: bool,
}

/// Contact summary for downstream consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactsSummary {
    pub has_email: bool,
    pub has_phone: bool,
    pub has_linkedin: bool,
}

/// Keyword summary for downstream consumers (notably prompt assembly in
/// the critique generator).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsSummary {
    pub mode: KeywordMode,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// The raw, uncalibrated synthesis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub scores: Scores,
    pub bullets: BulletRates,
    pub sections: SectionsSummary,
    pub contacts: ContactsSummary,
    pub keywords: KeywordsSummary,
    pub verdict: Verdict,
    pub issues: Vec<Issue>,
}

/// Combine structural signals and rule-engine output into the raw
/// analysis result.
pub fn synthesize(structural: &StructuralSignals, ats: AtsOutcome) -> AnalysisResult {
    let scores = Scores {
        ats_compatibility: 0.0,
        parsing_reliability: structural.parsing_reliability,
        role_alignment: ats.keywords.role_alignment,
        content_quality: ats.content.content_quality,
        section_coverage: ats.completeness.section_coverage,
        contact_score: ats.contacts.contact_score,
    };

    let composite = WEIGHT_PARSING * scores.parsing_reliability
        + WEIGHT_ROLE * scores.role_alignment
        + WEIGHT_CONTENT * scores.content_quality
        + WEIGHT_SECTIONS * scores.section_coverage
        + WEIGHT_CONTACT * scores.contact_score;
    let composite = composite.clamp(0.0, 100.0);

    let mut issues = Vec::new();
    issues.extend(ats.completeness.issues);
    issues.extend(ats.contacts.issues);
    issues.extend(ats.keywords.issues);
    issues.extend(ats.content.issues);

    if structural.parsing_reliability < PARSING_WARNING_BELOW {
        issues.push(Issue::warning(
            IssueCategory::Parsing,
            "document layout is likely to confuse automated resume parsers",
            Evidence::Document,
        ));
    }

    let mut verdict = Verdict::from_composite(composite);
    if issues.iter().any(|i| i.kind == IssueKind::HardFailure) {
        verdict = verdict.capped();
    }

    AnalysisResult {
        scores: Scores {
            ats_compatibility: composite,
            ..scores
        },
        bullets: BulletRates {
            metrics_rate: ats.content.metrics_rate,
            action_verb_rate: ats.content.action_verb_rate,
            bullet_count: ats.content.bullet_count,
        },
        sections: SectionsSummary {
            detected: ats.sections_detected,
            headers_recognized: structural.section_headers_recognized,
        },
        contacts: ContactsSummary {
            has_email: ats.contacts.has_email,
            has_phone: ats.contacts.has_phone,
            has_linkedin: ats.contacts.has_linkedin,
        },
        keywords: KeywordsSummary {
            mode: ats.keywords.mode,
            matched: ats.keywords.matched,
            missing: ats.keywords.missing,
        },
        verdict,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_bands_inclusive_lower_bounds() {
        assert_eq!(Verdict::from_composite(70.0), Verdict::Pass);
        assert_eq!(Verdict::from_composite(69.99), Verdict::WeakPass);
        assert_eq!(Verdict::from_composite(50.0), Verdict::WeakPass);
        assert_eq!(Verdict::from_composite(49.99), Verdict::Fail);
        assert_eq!(Verdict::from_composite(0.0), Verdict::Fail);
        assert_eq!(Verdict::from_composite(100.0), Verdict::Pass);
    }

    #[test]
    fn test_verdict_cap() {
        assert_eq!(Verdict::Pass.capped(), Verdict::WeakPass);
        assert_eq!(Verdict::WeakPass.capped(), Verdict::WeakPass);
        assert_eq!(Verdict::Fail.capped(), Verdict::Fail);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let sum = WEIGHT_PARSING + WEIGHT_ROLE + WEIGHT_CONTENT + WEIGHT_SECTIONS + WEIGHT_CONTACT;
        assert!((sum - 1.0).abs() < 1e-5);
    }
}
