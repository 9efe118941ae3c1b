//! Sections and bullets.

use serde::{Deserialize, Serialize};

use super::Confidence;

/// The recognized kinds of resume section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Contact,
    Other,
}

impl SectionKind {
    /// Essential sections: absence is a hard failure in ATS screening.
    /// Contact presence is judged from detected channels, not from a
    /// header, so it is not listed here.
    pub fn is_essential(self) -> bool {
        matches!(
            self,
            SectionKind::Experience | SectionKind::Education | SectionKind::Skills
        )
    }

    /// Sections whose child lines are candidate achievement bullets even
    /// without a bullet glyph.
    pub fn carries_bullets(self) -> bool {
        matches!(self, SectionKind::Experience | SectionKind::Projects)
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Summary => write!(f, "summary"),
            SectionKind::Experience => write!(f, "experience"),
            SectionKind::Education => write!(f, "education"),
            SectionKind::Skills => write!(f, "skills"),
            SectionKind::Projects => write!(f, "projects"),
            SectionKind::Contact => write!(f, "contact"),
            SectionKind::Other => write!(f, "other"),
        }
    }
}

/// A labeled span of the document with its achievement bullets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Detected kind.
    pub kind: SectionKind,
    /// Header text as written in the document.
    pub title: String,
    /// Detection confidence, derived from the source's base confidence.
    pub confidence: Confidence,
    /// Achievement/responsibility bullets under this header.
    pub bullets: Vec<Bullet>,
    /// First line of the section body (the line after the header).
    pub start_line: usize,
    /// One past the last body line.
    pub end_line: usize,
}

impl Section {
    pub fn new(
        kind: SectionKind,
        title: impl Into<String>,
        confidence: Confidence,
        start_line: usize,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            confidence,
            bullets: Vec::new(),
            start_line,
            end_line: start_line,
        }
    }
}

/// One achievement or responsibility line.
///
/// The `has_metric` / `has_action_verb` flags are derived once at build
/// time so every downstream consumer sees the same classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Bullet text with the leading glyph stripped.
    pub text: String,
    /// Contains a number, percent sign, or currency symbol.
    pub has_metric: bool,
    /// Starts with a strong action verb.
    pub has_action_verb: bool,
    /// Index of the owning section in `DocumentModel::sections`
    /// (back-reference, not ownership).
    pub section: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_essential_sections() {
        assert!(SectionKind::Experience.is_essential());
        assert!(SectionKind::Education.is_essential());
        assert!(SectionKind::Skills.is_essential());
        assert!(!SectionKind::Summary.is_essential());
        assert!(!SectionKind::Projects.is_essential());
    }

    #[test]
    fn test_bullet_carriers() {
        assert!(SectionKind::Experience.carries_bullets());
        assert!(SectionKind::Projects.carries_bullets());
        assert!(!SectionKind::Skills.carries_bullets());
    }
}
