//! Structural heuristics: parsing reliability from the risk flags.
//!
//! Pure function over the document model. The deduction table mirrors the
//! build-time risk weights so the two views stay consistent; role context
//! never enters here.

use serde::{Deserialize, Serialize};

use crate::build::{RISK_HEADER_FOOTER, RISK_ICON_GLYPHS, RISK_MULTI_COLUMN, RISK_TABLES};
use crate::model::DocumentModel;

/// Deduction for bullet glyphs outside the conventional set.
const DEDUCT_NONSTANDARD_BULLETS: f32 = 10.0;
/// Deduction for unconventional date formats.
const DEDUCT_NONSTANDARD_DATES: f32 = 10.0;
/// Deduction when fewer than two section headers were recognized.
const DEDUCT_NO_SECTION_HEADERS: f32 = 10.0;

/// Structural signals derived from the model's metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralSignals {
    /// How reliably an ATS will parse this document, `[0,100]`.
    pub parsing_reliability: f32,
    /// Number of detected sections.
    pub section_count: usize,
    /// Whether reliable section structure was found.
    pub section_headers_recognized: bool,
}

/// Convert the metadata risk flags into a parsing-reliability sub-score.
///
/// Deterministic: the same model always yields the same signals.
pub fn assess_structure(model: &DocumentModel) -> StructuralSignals {
    let meta = &model.metadata;

    let mut reliability: f32 = 100.0;
    if meta.multi_column {
        reliability -= RISK_MULTI_COLUMN as f32;
    }
    if meta.tables {
        reliability -= RISK_TABLES as f32;
    }
    if meta.icon_glyphs {
        reliability -= RISK_ICON_GLYPHS as f32;
    }
    if meta.header_footer_repetition {
        reliability -= RISK_HEADER_FOOTER as f32;
    }
    if meta.nonstandard_bullets {
        reliability -= DEDUCT_NONSTANDARD_BULLETS;
    }
    if meta.nonstandard_dates {
        reliability -= DEDUCT_NONSTANDARD_DATES;
    }
    if !meta.section_headers_recognized {
        reliability -= DEDUCT_NO_SECTION_HEADERS;
    }

    StructuralSignals {
        parsing_reliability: reliability.max(0.0),
        section_count: model.sections.len(),
        section_headers_recognized: meta.section_headers_recognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::SourceFormat;
    use crate::model::{DocumentMetadata, DocumentModel};

    fn model() -> DocumentModel {
        let mut metadata = DocumentMetadata::new("resume.txt", SourceFormat::PlainText);
        metadata.section_headers_recognized = true;
        DocumentModel {
            metadata,
            lines: Vec::new(),
            sections: Vec::new(),
            emails: Vec::new(),
            phones: Vec::new(),
            links: Vec::new(),
            skills: Vec::new(),
            raw_source_text: None,
        }
    }

    #[test]
    fn test_clean_model_full_reliability() {
        let signals = assess_structure(&model());
        assert_eq!(signals.parsing_reliability, 100.0);
    }

    #[test]
    fn test_deductions_stack() {
        let mut m = model();
        m.metadata.multi_column = true;
        m.metadata.tables = true;
        let signals = assess_structure(&m);
        assert_eq!(signals.parsing_reliability, 55.0);
    }

    #[test]
    fn test_reliability_floors_at_zero() {
        let mut m = model();
        m.metadata.multi_column = true;
        m.metadata.tables = true;
        m.metadata.icon_glyphs = true;
        m.metadata.header_footer_repetition = true;
        m.metadata.nonstandard_bullets = true;
        m.metadata.nonstandard_dates = true;
        m.metadata.section_headers_recognized = false;
        let signals = assess_structure(&m);
        assert_eq!(signals.parsing_reliability, 0.0);
    }

    #[test]
    fn test_deterministic() {
        let mut m = model();
        m.metadata.tables = true;
        let a = assess_structure(&m);
        let b = assess_structure(&m);
        assert_eq!(a.parsing_reliability, b.parsing_reliability);
    }
}
