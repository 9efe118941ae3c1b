//! Section coverage: essential sections missing are hard failures,
//! optional ones are advisory.

use serde::{Deserialize, Serialize};

use crate::model::{DocumentModel, SectionKind};

use super::issue::{Evidence, Issue, IssueCategory};

/// Sections an ATS expects to find; missing one blocks a pass.
const ESSENTIAL: &[SectionKind] = &[
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
];

/// Sections worth having; missing one is advisory only.
const OPTIONAL: &[(SectionKind, &str)] = &[
    (SectionKind::Summary, "a short professional summary"),
    (SectionKind::Projects, "a projects section"),
];

/// Outcome of the section-coverage check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessAssessment {
    /// Raw section-coverage sub-score, `[0,100]`, uncalibrated.
    pub section_coverage: f32,
    /// Essential sections present.
    pub essential_present: usize,
    /// Findings raised by this check.
    pub issues: Vec<Issue>,
}

/// Run the section-coverage check.
pub fn check_completeness(model: &DocumentModel) -> CompletenessAssessment {
    let mut issues = Vec::new();
    let mut essential_present = 0;

    for &kind in ESSENTIAL {
        if model.has_section(kind) {
            essential_present += 1;
        } else {
            issues.push(Issue::hard_failure(
                IssueCategory::Sections,
                format!("no {kind} section detected"),
                Evidence::MissingSection { section: kind },
            ));
        }
    }

    for &(kind, description) in OPTIONAL {
        if !model.has_section(kind) {
            issues.push(Issue::warning(
                IssueCategory::Sections,
                format!("consider adding {description}"),
                Evidence::MissingSection { section: kind },
            ));
        }
    }

    let section_coverage = 100.0 * essential_present as f32 / ESSENTIAL.len() as f32;

    CompletenessAssessment {
        section_coverage,
        essential_present,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::SourceFormat;
    use crate::model::{Confidence, DocumentMetadata, Section};
    use crate::analysis::issue::IssueKind;

    fn model_with_sections(kinds: &[SectionKind]) -> DocumentModel {
        DocumentModel {
            metadata: DocumentMetadata::new("resume.txt", SourceFormat::PlainText),
            lines: Vec::new(),
            sections: kinds
                .iter()
                .map(|&kind| Section::new(kind, kind.to_string(), Confidence::new(0.3), 0))
                .collect(),
            emails: Vec::new(),
            phones: Vec::new(),
            links: Vec::new(),
            skills: Vec::new(),
            raw_source_text: None,
        }
    }

    #[test]
    fn test_all_essential_present() {
        let model = model_with_sections(&[
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::Skills,
            SectionKind::Summary,
            SectionKind::Projects,
        ]);
        let assessment = check_completeness(&model);

        assert_eq!(assessment.section_coverage, 100.0);
        assert!(assessment
            .issues
            .iter()
            .all(|i| i.kind != IssueKind::HardFailure));
    }

    #[test]
    fn test_missing_essential_is_hard_failure() {
        let model = model_with_sections(&[SectionKind::Experience]);
        let assessment = check_completeness(&model);

        let hard: Vec<_> = assessment
            .issues
            .iter()
            .filter(|i| i.kind == IssueKind::HardFailure)
            .collect();
        assert_eq!(hard.len(), 2);
        assert!(hard.iter().all(|i| matches!(
            i.evidence[0],
            Evidence::MissingSection { .. }
        )));
        assert!((assessment.section_coverage - 100.0 / 3.0).abs() < 0.001);
    }

    #[test]
    fn test_missing_optional_is_warning() {
        let model = model_with_sections(&[
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::Skills,
        ]);
        let assessment = check_completeness(&model);

        assert!(assessment
            .issues
            .iter()
            .all(|i| i.kind == IssueKind::Warning));
        assert_eq!(assessment.issues.len(), 2);
    }
}
