//! # atslens
//!
//! Resume extraction and deterministic ATS compatibility scoring for
//! Rust.
//!
//! This library decodes an uploaded resume (PDF, Word document, or plain
//! text) into a canonical, confidence-annotated document model, runs a
//! deterministic battery of applicant-tracking-system compatibility
//! checks against it, and calibrates the results into bounded, stable,
//! user-facing feedback. No language model participates in scoring.
//!
//! ## Quick Start
//!
//! ```no_run
//! use atslens::{analyze_bytes, ExperienceLevel, JobContext};
//!
//! fn main() -> atslens::Result<()> {
//!     let bytes = std::fs::read("resume.pdf")?;
//!     let context = JobContext::new("software engineer", ExperienceLevel::Mid);
//!
//!     let report = analyze_bytes(&bytes, "resume.pdf", &context)?;
//!     println!("overall strength: {:.0}", report.interpretation.overall_strength);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! Data flows strictly forward; each stage constructs a new value:
//!
//! 1. **Extract** — format-specific extractors emit positioned text runs
//!    and native link annotations with provenance tags.
//! 2. **Build** — the model builder assembles the canonical
//!    [`DocumentModel`]: sections, bullets, contacts, skills, and
//!    layout-risk signals, each with a source-based confidence.
//! 3. **Assess & check** — pure structural heuristics and the
//!    deterministic rule engine produce raw sub-scores and typed,
//!    evidence-backed issues.
//! 4. **Synthesize & interpret** — fixed-weight score synthesis, then
//!    calibration into the bounded public range with softened messaging.
//!
//! Only extraction can fail; every stage after a model exists is a total
//! function, so even a nearly empty document produces a (low-scoring)
//! report.

pub mod analysis;
pub mod build;
pub mod context;
pub mod detect;
pub mod error;
pub mod extract;
pub mod interpret;
pub mod model;

// Re-export commonly used types
pub use analysis::{
    assess_structure, run_ats_checks, synthesize, AnalysisResult, Evidence, Issue, IssueCategory,
    IssueKind, KeywordMode, StructuralSignals, Verdict,
};
pub use context::{AnalysisOptions, ExperienceLevel, JobContext};
pub use detect::{detect_format_from_bytes, SourceFormat};
pub use error::{Error, Result};
pub use extract::{Extractor, ExtractorRegistry, IntermediateDocument, SourceTag, TextItem};
pub use interpret::{interpret, CalibratedMessage, InterpretationResult, ParsingStatus, Severity};
pub use model::{
    Bullet, ChannelKind, Confidence, DocumentMetadata, DocumentModel, Email, Link, Phone, Section,
    SectionKind, Skill, SkillEvidence,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Extract file bytes into the canonical document model.
///
/// # Example
///
/// ```no_run
/// use atslens::extract_bytes;
///
/// let bytes = std::fs::read("resume.pdf").unwrap();
/// let model = extract_bytes(&bytes, "resume.pdf").unwrap();
/// println!("sections: {}", model.sections.len());
/// ```
pub fn extract_bytes(bytes: &[u8], file_name: &str) -> Result<DocumentModel> {
    extract_bytes_with_options(bytes, file_name, &AnalysisOptions::default())
}

/// Extract file bytes with custom options (minimum-length threshold).
pub fn extract_bytes_with_options(
    bytes: &[u8],
    file_name: &str,
    options: &AnalysisOptions,
) -> Result<DocumentModel> {
    let registry = ExtractorRegistry::with_defaults();
    let intermediate = registry.extract_bytes(bytes, file_name)?;

    let visible = intermediate.visible_char_count();
    if visible < options.min_text_chars {
        return Err(Error::EmptyOrTooShort(visible));
    }

    Ok(build::build(intermediate))
}

/// Run structural assessment, the rule engine, and score synthesis
/// against an already-built model.
///
/// Total function: never fails, whatever the model looks like.
pub fn analyze(
    model: &DocumentModel,
    context: &JobContext,
    options: &AnalysisOptions,
) -> AnalysisResult {
    let structural = assess_structure(model);
    let ats = run_ats_checks(model, context, options);
    synthesize(&structural, ats)
}

/// The full pipeline output: model, raw analysis, and the calibrated
/// interpretation, plus a report timestamp.
///
/// `generated_at` lives on this envelope rather than inside the scored
/// payload, so the scoring itself stays byte-idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub model: DocumentModel,
    pub analysis: AnalysisResult,
    pub interpretation: InterpretationResult,
    pub generated_at: DateTime<Utc>,
}

/// Run the whole pipeline: bytes in, calibrated report out.
pub fn analyze_bytes(bytes: &[u8], file_name: &str, context: &JobContext) -> Result<Report> {
    Atslens::new().with_context(context.clone()).analyze_bytes(bytes, file_name)
}

/// Builder for configuring and running the analysis pipeline.
///
/// # Example
///
/// ```no_run
/// use atslens::{Atslens, ExperienceLevel};
///
/// let report = Atslens::new()
///     .with_role("data scientist")
///     .with_level(ExperienceLevel::Senior)
///     .with_job_description("We need Python, SQL, and dashboards.")
///     .with_jd_weight(0.8)
///     .analyze_file("resume.pdf")?;
/// # Ok::<(), atslens::Error>(())
/// ```
pub struct Atslens {
    context: JobContext,
    options: AnalysisOptions,
}

impl Atslens {
    /// Create a new builder with a generic role and default options.
    pub fn new() -> Self {
        Self {
            context: JobContext::default(),
            options: AnalysisOptions::default(),
        }
    }

    /// Replace the whole job context.
    pub fn with_context(mut self, context: JobContext) -> Self {
        self.context = context;
        self
    }

    /// Set the target role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.context.target_role = role.into();
        self
    }

    /// Set the applicant's experience level.
    pub fn with_level(mut self, level: ExperienceLevel) -> Self {
        self.context.experience_level = level;
        self
    }

    /// Attach a job description (enables JD-aware keyword weighting).
    pub fn with_job_description(mut self, jd: impl Into<String>) -> Self {
        self.context.job_description = Some(jd.into());
        self
    }

    /// Set the JD-vs-role keyword blend weight.
    pub fn with_jd_weight(mut self, weight: f32) -> Self {
        self.options = self.options.with_jd_weight(weight);
        self
    }

    /// Run the rule checks sequentially instead of in parallel.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Run the pipeline over in-memory bytes.
    pub fn analyze_bytes(self, bytes: &[u8], file_name: &str) -> Result<Report> {
        let model = extract_bytes_with_options(bytes, file_name, &self.options)?;
        let analysis = analyze(&model, &self.context, &self.options);
        let interpretation = interpret(&analysis);

        log::info!(
            "analyzed {file_name}: composite {:.1}, verdict {:?}",
            analysis.scores.ats_compatibility,
            analysis.verdict
        );

        Ok(Report {
            model,
            analysis,
            interpretation,
            generated_at: Utc::now(),
        })
    }

    /// Run the pipeline over a file on disk.
    pub fn analyze_file<P: AsRef<std::path::Path>>(self, path: P) -> Result<Report> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume");
        self.analyze_bytes(&bytes, file_name)
    }
}

impl Default for Atslens {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "\
Jane Doe
jane.doe@example.com | +1 415 555 0134 | linkedin.com/in/janedoe

Summary
Backend engineer focused on reliability.

Experience
Acme Corp, Senior Engineer, Jan 2020 - Present
- Reduced API latency by 30%
- Led a team of 5 engineers
- Shipped the billing migration

Education
BS Computer Science, State University, 2016

Skills
Rust, Kubernetes, SQL, Docker
";

    #[test]
    fn test_analyze_bytes_end_to_end() {
        let context = JobContext::new("software engineer", ExperienceLevel::Mid);
        let report = analyze_bytes(RESUME.as_bytes(), "resume.txt", &context).unwrap();

        assert!(report.analysis.scores.ats_compatibility > 0.0);
        assert!(report.interpretation.overall_strength >= 35.0);
        assert!(report.interpretation.overall_strength <= 92.0);
        assert!(report.model.has_section(SectionKind::Experience));
    }

    #[test]
    fn test_too_short_input_is_rejected() {
        let context = JobContext::default();
        let result = analyze_bytes(b"Jane Doe", "resume.txt", &context);
        assert!(matches!(result, Err(Error::EmptyOrTooShort(_))));
    }

    #[test]
    fn test_builder_chain() {
        let report = Atslens::new()
            .with_role("software engineer")
            .with_level(ExperienceLevel::Senior)
            .sequential()
            .analyze_bytes(RESUME.as_bytes(), "resume.txt")
            .unwrap();
        assert!(!report.interpretation.improvements.is_empty() || !report.interpretation.highlights.is_empty());
    }

    #[test]
    fn test_role_context_does_not_leak_into_structure() {
        let swe = JobContext::new("software engineer", ExperienceLevel::Mid);
        let pm = JobContext::new("product manager", ExperienceLevel::Mid);

        let a = analyze_bytes(RESUME.as_bytes(), "resume.txt", &swe).unwrap();
        let b = analyze_bytes(RESUME.as_bytes(), "resume.txt", &pm).unwrap();

        assert_eq!(
            a.analysis.scores.parsing_reliability,
            b.analysis.scores.parsing_reliability
        );
        assert_ne!(
            a.analysis.scores.role_alignment,
            b.analysis.scores.role_alignment
        );
    }
}
