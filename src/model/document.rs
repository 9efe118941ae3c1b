//! Document-level types: the aggregate model and its metadata.

use serde::{Deserialize, Serialize};

use crate::detect::SourceFormat;
use crate::extract::SourceTag;

use super::{Email, Link, Phone, Section, SectionKind, Skill};

/// File-level metadata plus the structural-risk signals detected during
/// the build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Declared file name of the upload.
    pub file_name: String,
    /// Detected source format.
    pub format: SourceFormat,
    /// Page count (PDF) — 1 for flat formats.
    pub page_count: u32,
    /// Paragraph/line count of the assembled document.
    pub paragraph_count: u32,

    /// Two or more lines broken into column-like runs.
    pub multi_column: bool,
    /// Pipe/tab/double-comma separated rows.
    pub tables: bool,
    /// Decorative Unicode symbol glyphs present.
    pub icon_glyphs: bool,
    /// Repeated page-furniture lines near the top or bottom.
    pub header_footer_repetition: bool,
    /// Bullet lines led by glyphs outside the conventional set.
    pub nonstandard_bullets: bool,
    /// Date-bearing lines with no conventionally formatted date.
    pub nonstandard_dates: bool,
    /// Two or more recognized section headers were found.
    pub section_headers_recognized: bool,

    /// Aggregated parse-failure risk in `[0,100]`; additive with fixed
    /// per-flag weights, saturating at 100.
    pub ats_parse_failure_risk: u8,
}

impl DocumentMetadata {
    pub fn new(file_name: impl Into<String>, format: SourceFormat) -> Self {
        Self {
            file_name: file_name.into(),
            format,
            page_count: 1,
            paragraph_count: 0,
            multi_column: false,
            tables: false,
            icon_glyphs: false,
            header_footer_repetition: false,
            nonstandard_bullets: false,
            nonstandard_dates: false,
            section_headers_recognized: false,
            ats_parse_failure_risk: 0,
        }
    }
}

/// One assembled line of document text with its provenance.
///
/// Lines are the owned form of the extractor's text items after baseline
/// grouping; all evidence pointers that reference "a line" index into
/// [`DocumentModel::lines`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    /// Assembled line text.
    pub text: String,
    /// 1-indexed page the line came from (1 for flat formats).
    pub page: u32,
    /// Provenance of the underlying text items.
    pub source: SourceTag,
}

/// The canonical, confidence-annotated representation of a resume.
///
/// Built once per upload and immutable thereafter. All downstream analysis
/// reads this single object; `raw_source_text` is a debug-only side
/// channel and never drives scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentModel {
    /// File metadata and structural-risk signals.
    pub metadata: DocumentMetadata,
    /// Assembled document lines in reading order.
    pub lines: Vec<Line>,
    /// Detected sections with their bullets.
    pub sections: Vec<Section>,
    /// Detected email addresses.
    pub emails: Vec<Email>,
    /// Detected phone numbers.
    pub phones: Vec<Phone>,
    /// Detected hyperlinks.
    pub links: Vec<Link>,
    /// Normalized skills.
    pub skills: Vec<Skill>,
    /// Unprocessed extraction dump, kept only for debugging. Not part of
    /// the scored surface; omitted from serialized output.
    #[serde(skip)]
    pub raw_source_text: Option<String>,
}

impl DocumentModel {
    /// Canonical plain text, derived from the assembled lines.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// First section of the given kind, if any.
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Whether a section of the given kind was detected.
    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.section(kind).is_some()
    }

    /// All bullets across all sections, in document order.
    pub fn bullets(&self) -> impl Iterator<Item = &crate::model::Bullet> {
        self.sections.iter().flat_map(|s| s.bullets.iter())
    }

    /// Total bullet count.
    pub fn bullet_count(&self) -> usize {
        self.sections.iter().map(|s| s.bullets.len()).sum()
    }

    /// First link of the given kind, if any.
    pub fn link(&self, kind: crate::model::ChannelKind) -> Option<&Link> {
        self.links.iter().find(|l| l.kind == kind)
    }

    /// True when no usable text survived extraction.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.text.trim().is_empty())
    }
}
