//! Structural heuristics and the deterministic ATS rule engine.
//!
//! The rule engine's check families (keywords, content, section
//! coverage, contacts) are read-only and mutually independent, so they
//! run concurrently against the immutable model and their issue lists
//! are merged afterward. Sub-scores come out raw and uncalibrated; the
//! interpretation layer owns the public-facing transform.

mod completeness;
mod contact_checks;
mod content;
mod issue;
mod keywords;
mod structural;
mod synthesis;

pub use completeness::{check_completeness, CompletenessAssessment};
pub use contact_checks::{check_contacts, ContactAssessment};
pub use content::{check_content, ContentAssessment};
pub use issue::{Evidence, Issue, IssueCategory, IssueKind};
pub use keywords::{check_keywords, KeywordAssessment, KeywordMode};
pub use structural::{assess_structure, StructuralSignals};
pub use synthesis::{
    synthesize, AnalysisResult, BulletRates, ContactsSummary, KeywordsSummary, Scores,
    SectionsSummary, Verdict,
};

use crate::context::{AnalysisOptions, JobContext};
use crate::model::{DocumentModel, SectionKind};

/// Merged output of the four rule-engine check families.
#[derive(Debug, Clone)]
pub struct AtsOutcome {
    pub keywords: KeywordAssessment,
    pub content: ContentAssessment,
    pub completeness: CompletenessAssessment,
    pub contacts: ContactAssessment,
    /// Section kinds present, in document order.
    pub sections_detected: Vec<SectionKind>,
}

/// Run the ATS rule engine against the model.
///
/// Total function: any model, however empty, yields an outcome. The
/// checks only read the model, so the parallel path needs no locking.
pub fn run_ats_checks(
    model: &DocumentModel,
    context: &JobContext,
    options: &AnalysisOptions,
) -> AtsOutcome {
    let (keywords, content, completeness, contacts) = if options.parallel {
        let ((keywords, content), (completeness, contacts)) = rayon::join(
            || {
                rayon::join(
                    || check_keywords(model, context, options.jd_weight),
                    || check_content(model, context.experience_level),
                )
            },
            || rayon::join(|| check_completeness(model), || check_contacts(model)),
        );
        (keywords, content, completeness, contacts)
    } else {
        (
            check_keywords(model, context, options.jd_weight),
            check_content(model, context.experience_level),
            check_completeness(model),
            check_contacts(model),
        )
    };

    AtsOutcome {
        keywords,
        content,
        completeness,
        contacts,
        sections_detected: model.sections.iter().map(|s| s.kind).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build;
    use crate::context::ExperienceLevel;
    use crate::detect::SourceFormat;
    use crate::extract::{IntermediateDocument, SourceInfo, SourceTag, TextItem};

    fn model_from_text(text: &str) -> DocumentModel {
        let mut doc =
            IntermediateDocument::new(SourceInfo::new("resume.txt", SourceFormat::PlainText));
        for line in text.lines() {
            if !line.trim().is_empty() {
                doc.items.push(TextItem::new(line, SourceTag::PlainFallback));
            }
        }
        build::build(doc)
    }

    const RESUME: &str = "\
Jane Doe
jane.doe@example.com | +1 415 555 0134
Experience
- Reduced API latency by 30%
- Led a team of 5 engineers
Education
BS Computer Science, 2016
Skills
Rust, Kubernetes, SQL
";

    #[test]
    fn test_parallel_and_sequential_agree() {
        let model = model_from_text(RESUME);
        let context = JobContext::new("software engineer", ExperienceLevel::Mid);

        let parallel = run_ats_checks(&model, &context, &AnalysisOptions::default());
        let sequential =
            run_ats_checks(&model, &context, &AnalysisOptions::default().sequential());

        assert_eq!(
            parallel.keywords.role_alignment,
            sequential.keywords.role_alignment
        );
        assert_eq!(
            parallel.content.content_quality,
            sequential.content.content_quality
        );
        assert_eq!(parallel.contacts.has_email, sequential.contacts.has_email);
        assert_eq!(
            parallel.completeness.essential_present,
            sequential.completeness.essential_present
        );
    }

    #[test]
    fn test_outcome_on_empty_model_is_total() {
        let model = model_from_text("");
        let context = JobContext::new("software engineer", ExperienceLevel::Mid);
        let outcome = run_ats_checks(&model, &context, &AnalysisOptions::default());

        assert!(!outcome.contacts.has_email);
        assert_eq!(outcome.content.bullet_count, 0);
        // Every issue still carries evidence.
        for issue in outcome
            .completeness
            .issues
            .iter()
            .chain(outcome.contacts.issues.iter())
            .chain(outcome.keywords.issues.iter())
            .chain(outcome.content.issues.iter())
        {
            assert!(!issue.evidence.is_empty());
        }
    }
}
