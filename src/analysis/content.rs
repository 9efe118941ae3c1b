//! Bullet content quality: action verbs and quantified impact.
//!
//! The per-bullet flags were derived at build time; this check only
//! aggregates them into rates, raises threshold warnings, and folds the
//! rates into a content-quality sub-score.

use serde::{Deserialize, Serialize};

use crate::context::ExperienceLevel;
use crate::model::DocumentModel;

use super::issue::{Evidence, Issue, IssueCategory};

/// Bullets with a metric below this rate draw a warning.
const METRICS_RATE_THRESHOLD: f32 = 0.3;
/// Entry-level applicants get a relaxed metric threshold.
const METRICS_RATE_THRESHOLD_ENTRY: f32 = 0.2;
/// Bullets opening with a strong verb below this rate draw a warning.
const ACTION_VERB_RATE_THRESHOLD: f32 = 0.5;
/// Documents with fewer bullets than this draw a warning.
const MIN_BULLETS: usize = 3;

/// Weight of the verb rate in the content-quality score.
const VERB_WEIGHT: f32 = 0.5;
/// Weight of the metric rate in the content-quality score.
const METRIC_WEIGHT: f32 = 0.5;

/// Outcome of the content checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAssessment {
    /// Raw content-quality sub-score, `[0,100]`, uncalibrated.
    pub content_quality: f32,
    /// Fraction of bullets carrying a metric.
    pub metrics_rate: f32,
    /// Fraction of bullets opening with a strong verb.
    pub action_verb_rate: f32,
    /// Total bullets inspected.
    pub bullet_count: usize,
    /// Findings raised by this check.
    pub issues: Vec<Issue>,
}

/// Run the action-verb / quantified-impact checks.
pub fn check_content(model: &DocumentModel, level: ExperienceLevel) -> ContentAssessment {
    let bullet_count = model.bullet_count();
    let mut issues = Vec::new();

    if bullet_count == 0 {
        issues.push(Issue::warning(
            IssueCategory::Content,
            "no achievement bullets detected",
            Evidence::Document,
        ));
        return ContentAssessment {
            content_quality: 0.0,
            metrics_rate: 0.0,
            action_verb_rate: 0.0,
            bullet_count,
            issues,
        };
    }

    let with_metric = model.bullets().filter(|b| b.has_metric).count();
    let with_verb = model.bullets().filter(|b| b.has_action_verb).count();
    let metrics_rate = with_metric as f32 / bullet_count as f32;
    let action_verb_rate = with_verb as f32 / bullet_count as f32;

    let metric_threshold = match level {
        ExperienceLevel::Entry => METRICS_RATE_THRESHOLD_ENTRY,
        _ => METRICS_RATE_THRESHOLD,
    };

    if metrics_rate < metric_threshold {
        let mut issue = Issue::warning(
            IssueCategory::Content,
            format!(
                "only {with_metric} of {bullet_count} bullets quantify their impact"
            ),
            Evidence::Document,
        );
        // Cite the first few unquantified bullets so the finding is
        // actionable.
        for (section_index, section) in model.sections.iter().enumerate() {
            for (bullet_index, bullet) in section.bullets.iter().enumerate() {
                if !bullet.has_metric && issue.evidence.len() < 4 {
                    issue = issue.with_evidence(Evidence::Bullet {
                        section: section_index,
                        bullet: bullet_index,
                    });
                }
            }
        }
        issues.push(issue);
    }

    if action_verb_rate < ACTION_VERB_RATE_THRESHOLD {
        issues.push(Issue::warning(
            IssueCategory::Content,
            format!(
                "only {with_verb} of {bullet_count} bullets open with a strong action verb"
            ),
            Evidence::Document,
        ));
    }

    if bullet_count < MIN_BULLETS {
        issues.push(Issue::warning(
            IssueCategory::Content,
            format!("only {bullet_count} achievement bullets in the whole document"),
            Evidence::Document,
        ));
    }

    let content_quality =
        100.0 * (VERB_WEIGHT * action_verb_rate + METRIC_WEIGHT * metrics_rate);

    ContentAssessment {
        content_quality,
        metrics_rate,
        action_verb_rate,
        bullet_count,
        issues,
    }
}
