//! Job context and analysis configuration.
//!
//! All configuration is passed into the pipeline explicitly; there are no
//! process-level singletons. `AnalysisOptions` follows the same fluent
//! builder shape as the extraction options.

use serde::{Deserialize, Serialize};

/// Seniority band of the applicant, supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
    Executive,
}

impl std::str::FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entry" | "junior" | "graduate" => Ok(ExperienceLevel::Entry),
            "mid" | "intermediate" => Ok(ExperienceLevel::Mid),
            "senior" | "staff" | "lead" => Ok(ExperienceLevel::Senior),
            "executive" | "director" | "principal" => Ok(ExperienceLevel::Executive),
            other => Err(format!("unknown experience level: {other}")),
        }
    }
}

/// The role the resume is being screened against, plus optional job
/// posting details.
///
/// When `job_description` is present the keyword checks shift weight
/// toward terms extracted from it; otherwise the static role table alone
/// is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobContext {
    /// Target role, matched against the built-in role keyword table.
    pub target_role: String,
    /// Applicant seniority band.
    pub experience_level: ExperienceLevel,
    /// Exact job title from the posting, if known.
    pub job_title: Option<String>,
    /// Full job description text, if supplied.
    pub job_description: Option<String>,
}

impl JobContext {
    pub fn new(target_role: impl Into<String>, experience_level: ExperienceLevel) -> Self {
        Self {
            target_role: target_role.into(),
            experience_level,
            job_title: None,
            job_description: None,
        }
    }

    /// Attach a job description, enabling JD-aware keyword weighting.
    pub fn with_job_description(mut self, jd: impl Into<String>) -> Self {
        self.job_description = Some(jd.into());
        self
    }

    /// Attach the posting's job title.
    pub fn with_job_title(mut self, title: impl Into<String>) -> Self {
        self.job_title = Some(title.into());
        self
    }
}

/// Options for the analysis stages.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Weight given to job-description keywords when both a role table and
    /// a job description are available. `0.0` ignores the description,
    /// `1.0` ignores the role table.
    pub jd_weight: f32,

    /// Run the independent rule-engine checks in parallel.
    pub parallel: bool,

    /// Minimum visible characters the extraction must produce.
    pub min_text_chars: usize,
}

impl AnalysisOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the JD-vs-role keyword blend weight (clamped to `[0,1]`).
    pub fn with_jd_weight(mut self, weight: f32) -> Self {
        self.jd_weight = weight.clamp(0.0, 1.0);
        self
    }

    /// Disable parallel rule checks.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the minimum extracted-text length.
    pub fn with_min_text_chars(mut self, chars: usize) -> Self {
        self.min_text_chars = chars;
        self
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            jd_weight: 0.7,
            parallel: true,
            min_text_chars: 80,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = AnalysisOptions::new()
            .with_jd_weight(0.5)
            .sequential()
            .with_min_text_chars(40);

        assert_eq!(options.jd_weight, 0.5);
        assert!(!options.parallel);
        assert_eq!(options.min_text_chars, 40);
    }

    #[test]
    fn test_jd_weight_clamped() {
        assert_eq!(AnalysisOptions::new().with_jd_weight(1.7).jd_weight, 1.0);
        assert_eq!(AnalysisOptions::new().with_jd_weight(-0.3).jd_weight, 0.0);
    }

    #[test]
    fn test_experience_level_from_str() {
        assert_eq!(
            "senior".parse::<ExperienceLevel>().unwrap(),
            ExperienceLevel::Senior
        );
        assert_eq!(
            "Junior".parse::<ExperienceLevel>().unwrap(),
            ExperienceLevel::Entry
        );
        assert!("wizard".parse::<ExperienceLevel>().is_err());
    }

    #[test]
    fn test_job_context_builder() {
        let ctx = JobContext::new("software engineer", ExperienceLevel::Mid)
            .with_job_title("Backend Engineer")
            .with_job_description("We need Rust and Postgres.");
        assert_eq!(ctx.job_title.as_deref(), Some("Backend Engineer"));
        assert!(ctx.job_description.is_some());
    }
}
