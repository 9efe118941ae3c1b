//! Normalized skill tokens.

use serde::{Deserialize, Serialize};

use super::Confidence;

/// How a skill was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillEvidence {
    /// Literally named, typically in a skills section.
    Explicit,
    /// Inferred from bullet context against a fixed technology vocabulary.
    Implicit,
}

/// A normalized skill token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    /// Normalized (lowercased, trimmed) skill name.
    pub name: String,
    /// How the skill was established.
    pub evidence: SkillEvidence,
    /// Provenance-based confidence.
    pub confidence: Confidence,
}

impl Skill {
    pub fn new(name: impl Into<String>, evidence: SkillEvidence, confidence: Confidence) -> Self {
        Self {
            name: name.into().trim().to_lowercase(),
            evidence,
            confidence,
        }
    }
}
