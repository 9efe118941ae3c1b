//! Verdict softening, issue rewording, highlights, and the parsing
//! banner.
//!
//! Everything here is string substitution over the raw analysis: severity
//! tiers and evidence pass through untouched, only the wording changes.

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisResult, Evidence, Issue, IssueCategory, IssueKind, Verdict};

/// Parsing reliability below this gets the critical banner.
const PARSING_CRITICAL_BELOW: f32 = 60.0;
/// Parsing reliability below this (but not critical) gets the warning
/// banner.
const PARSING_WARNING_BELOW: f32 = 85.0;

/// Highlight thresholds.
const HIGHLIGHT_PARSING_ABOVE: f32 = 80.0;
const HIGHLIGHT_METRICS_ABOVE: f32 = 0.4;
const HIGHLIGHT_VERBS_ABOVE: f32 = 0.8;
const HIGHLIGHT_MIN_SECTIONS: usize = 4;

/// Targeted wording substitutions applied to internal messages before
/// they are shown. Evidence is never touched.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("keyword gap:", "room to expand your specialized vocabulary:"),
    ("no email address found", "an email address is not yet visible"),
    ("no phone number found", "a phone number is not yet visible"),
    ("no LinkedIn profile link found", "a LinkedIn profile would round out your contact details"),
    ("no portfolio or code-hosting link found", "a portfolio or GitHub link would showcase your work"),
    ("no experience section detected", "a clearly labeled Experience section is not easy to find"),
    ("no education section detected", "a clearly labeled Education section is not easy to find"),
    ("no skills section detected", "a clearly labeled Skills section is not easy to find"),
    ("unprofessional", "less polished than the rest of your resume"),
];

/// Public severity tier of an improvement message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// A softened, user-facing improvement message. The underlying evidence
/// rides along unchanged for anything that needs to trace it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibratedMessage {
    pub severity: Severity,
    /// Tier label shown as the card heading.
    pub title: String,
    /// Softened message body.
    pub message: String,
    pub category: IssueCategory,
    /// Evidence pointers copied verbatim from the source issue.
    pub evidence: Vec<Evidence>,
}

/// Status of the parsing-context banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsingStatus {
    Stable,
    Warning,
    Critical,
}

/// The parsing-context banner shown above the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingContext {
    pub status: ParsingStatus,
    pub message: String,
}

/// Map the internal verdict onto supportive user-facing prose. Pure
/// substitution keyed by verdict, no recomputation.
pub fn soften_verdict(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Pass => "Strong foundation — your resume is well-positioned for automated screening.",
        Verdict::WeakPass => "Solid start — a few focused changes would make your resume stand out.",
        Verdict::Fail => "Plenty of headroom — the improvements below are high-leverage.",
    }
}

/// Rewrite one internal issue into its public form.
pub fn soften_issue(issue: &Issue) -> CalibratedMessage {
    let (severity, title) = match issue.kind {
        IssueKind::HardFailure => (Severity::Critical, "High Impact Optimization"),
        IssueKind::Warning => (Severity::Warning, "Recommended Improvement"),
        IssueKind::Info => (Severity::Info, "Pro Tip"),
    };

    let mut message = issue.message.clone();
    for (from, to) in SUBSTITUTIONS {
        if message.contains(from) {
            message = message.replace(from, to);
        }
    }

    CalibratedMessage {
        severity,
        title: title.to_string(),
        message,
        category: issue.category,
        evidence: issue.evidence.clone(),
    }
}

/// Derive positive highlights, independent of any issues: a document can
/// have both highlights and improvements at the same time.
pub fn derive_highlights(analysis: &AnalysisResult) -> Vec<String> {
    let mut highlights = Vec::new();

    if analysis.scores.parsing_reliability > HIGHLIGHT_PARSING_ABOVE {
        highlights.push("Clean, parser-friendly formatting that ATS software reads reliably.".to_string());
    }
    if analysis.bullets.metrics_rate > HIGHLIGHT_METRICS_ABOVE {
        highlights.push(format!(
            "{}% of your bullets quantify their impact — recruiters notice that.",
            (analysis.bullets.metrics_rate * 100.0).round() as u32
        ));
    }
    if analysis.bullets.action_verb_rate > HIGHLIGHT_VERBS_ABOVE {
        highlights.push("Your bullets consistently open with strong action verbs.".to_string());
    }
    if analysis.contacts.has_linkedin {
        highlights.push("LinkedIn profile is present and easy to find.".to_string());
    }
    if analysis.sections.detected.len() >= HIGHLIGHT_MIN_SECTIONS {
        highlights.push(format!(
            "Well-organized structure with {} labeled sections.",
            analysis.sections.detected.len()
        ));
    }

    highlights
}

/// Build the parsing-context banner from the raw reliability score.
pub fn parsing_context(parsing_reliability: f32) -> ParsingContext {
    let (status, message) = if parsing_reliability < PARSING_CRITICAL_BELOW {
        (
            ParsingStatus::Critical,
            "Parts of this resume were hard to read automatically, so some scores may \
             underestimate you. Consider a simpler, single-column layout.",
        )
    } else if parsing_reliability < PARSING_WARNING_BELOW {
        (
            ParsingStatus::Warning,
            "Most of this resume parsed cleanly, with a few elements that tracking systems \
             may stumble on.",
        )
    } else {
        (
            ParsingStatus::Stable,
            "This resume parsed cleanly; the scores below reflect its content.",
        )
    };

    ParsingContext {
        status,
        message: message.to_string(),
    }
}
