//! Format extractors producing a shared intermediate record shape.
//!
//! Each supported format has its own [`Extractor`] implementation, all
//! emitting the same [`IntermediateDocument`]: positioned text runs,
//! native link annotations where the format encodes them, and basic
//! source metadata. The [`ExtractorRegistry`] dispatches on detected
//! format, falling back to raw text decoding so unknown content degrades
//! instead of failing.

mod docx;
mod pdf;
mod text;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::detect::{detect_format_from_bytes, SourceFormat};
use crate::error::{Error, Result};
use crate::model::Confidence;

/// Provenance tag attached to every extracted text run.
///
/// The ordering of base confidences is a fixed invariant: machine-encoded
/// sources always outrank pattern-matched ones for an equivalent fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceTag {
    /// Native PDF hyperlink annotation — machine-encoded, highest tier.
    PdfAnnotation,
    /// Text recovered from PDF content streams with coordinates.
    PdfText,
    /// Word-document paragraph stream; boundaries are a lossy
    /// reconstruction, so the tier is capped.
    DocxText,
    /// Raw UTF-8 decoding of unrecognized content — lowest tier.
    PlainFallback,
}

impl SourceTag {
    /// Fixed base confidence for facts originating from this source.
    pub fn base_confidence(self) -> Confidence {
        match self {
            SourceTag::PdfAnnotation => Confidence::new(0.95),
            SourceTag::PdfText => Confidence::new(0.80),
            SourceTag::DocxText => Confidence::new(0.60),
            SourceTag::PlainFallback => Confidence::new(0.40),
        }
    }
}

/// Page-relative position of a text run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Position {
    /// 1-indexed page number.
    pub page: u32,
    /// Left edge in page units.
    pub x: f32,
    /// Baseline in page units.
    pub y: f32,
    /// Approximate run width.
    pub width: f32,
    /// Approximate run height (font size).
    pub height: f32,
}

/// A run of text with provenance and an optional 2-D position.
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextItem {
    /// NFC-normalized run text.
    pub text: String,
    /// Where the run came from.
    pub source: SourceTag,
    /// Page-relative position, when the format provides one.
    pub position: Option<Position>,
}

impl TextItem {
    /// Create an unpositioned run. Text is NFC-normalized on the way in.
    pub fn new(text: impl Into<String>, source: SourceTag) -> Self {
        Self {
            text: text.into().nfc().collect(),
            source,
            position: None,
        }
    }

    /// Create a positioned run.
    pub fn positioned(text: impl Into<String>, source: SourceTag, position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::new(text, source)
        }
    }
}

/// A native hyperlink annotation recovered from the document structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkAnnotation {
    /// Annotation target URI.
    pub url: String,
    /// 1-indexed page carrying the annotation.
    pub page: u32,
}

/// Source-level metadata captured during extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Declared file name.
    pub file_name: String,
    /// Detected format.
    pub format: SourceFormat,
    /// Page count (1 for flat formats).
    pub page_count: u32,
    /// Document title from embedded metadata, if any.
    pub title: Option<String>,
    /// Document author from embedded metadata, if any.
    pub author: Option<String>,
    /// Creation date from embedded metadata, if any.
    pub created: Option<DateTime<Utc>>,
    /// Modification date from embedded metadata, if any.
    pub modified: Option<DateTime<Utc>>,
}

impl SourceInfo {
    pub fn new(file_name: impl Into<String>, format: SourceFormat) -> Self {
        Self {
            file_name: file_name.into(),
            format,
            page_count: 1,
            title: None,
            author: None,
            created: None,
            modified: None,
        }
    }
}

/// The shared output shape of every extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntermediateDocument {
    /// Source metadata.
    pub source: SourceInfo,
    /// Text runs in extraction order.
    pub items: Vec<TextItem>,
    /// Native link annotations (PDF only; empty elsewhere).
    pub link_annotations: Vec<LinkAnnotation>,
}

impl IntermediateDocument {
    pub fn new(source: SourceInfo) -> Self {
        Self {
            source,
            items: Vec::new(),
            link_annotations: Vec::new(),
        }
    }

    /// Count of non-whitespace characters across all runs.
    pub fn visible_char_count(&self) -> usize {
        self.items
            .iter()
            .map(|i| i.text.chars().filter(|c| !c.is_whitespace()).count())
            .sum()
    }

    /// Base confidence of the dominant text source.
    pub fn base_confidence(&self) -> Confidence {
        self.items
            .iter()
            .map(|i| i.source)
            .next()
            .unwrap_or(SourceTag::PlainFallback)
            .base_confidence()
    }
}

/// Trait for format extractors.
///
/// Implement this to add support for a new document format without
/// touching the model builder.
pub trait Extractor: Send + Sync {
    /// Supported file extensions, lowercase, without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Short name of this extractor.
    fn name(&self) -> &str;

    /// Decode bytes into the intermediate record shape.
    fn extract(&self, bytes: &[u8], file_name: &str) -> Result<IntermediateDocument>;

    /// Check if this extractor handles the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry of format extractors keyed by extension and name.
pub struct ExtractorRegistry {
    by_extension: HashMap<String, Arc<dyn Extractor>>,
    by_name: HashMap<String, Arc<dyn Extractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            by_extension: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the default extractors (PDF, DOCX, plain
    /// text).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfExtractor::new()));
        registry.register(Arc::new(DocxExtractor::new()));
        registry.register(Arc::new(PlainTextExtractor::new()));
        registry
    }

    /// Register an extractor for all its supported extensions.
    pub fn register(&mut self, extractor: Arc<dyn Extractor>) {
        for ext in extractor.supported_extensions() {
            self.by_extension
                .insert(ext.to_lowercase(), extractor.clone());
        }
        self.by_name
            .insert(extractor.name().to_lowercase(), extractor);
    }

    /// Get an extractor by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn Extractor>> {
        self.by_extension.get(&ext.to_lowercase()).cloned()
    }

    /// Get an extractor by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn Extractor>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.by_extension.contains_key(&ext.to_lowercase())
    }

    /// Detect the format of `bytes` and run the matching extractor.
    ///
    /// Content sniffing decides the extractor; the declared extension only
    /// participates in rejecting recognizably foreign files.
    pub fn extract_bytes(&self, bytes: &[u8], file_name: &str) -> Result<IntermediateDocument> {
        let format = detect_format_from_bytes(bytes, file_name)?;
        let name = match format {
            SourceFormat::Pdf => "pdf",
            SourceFormat::Docx => "docx",
            SourceFormat::PlainText => "text",
        };
        let extractor = self
            .get_by_name(name)
            .ok_or_else(|| Error::UnsupportedFormat(name.to_string()))?;

        log::debug!("extracting {file_name} with the {name} extractor");
        extractor.extract(bytes, file_name)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_tag_confidence_ordering() {
        // Machine-encoded sources must never rank below heuristic ones.
        assert!(
            SourceTag::PdfAnnotation.base_confidence() > SourceTag::PdfText.base_confidence()
        );
        assert!(SourceTag::PdfText.base_confidence() > SourceTag::DocxText.base_confidence());
        assert!(
            SourceTag::DocxText.base_confidence() > SourceTag::PlainFallback.base_confidence()
        );
    }

    #[test]
    fn test_text_item_nfc_normalization() {
        // e + combining acute -> precomposed é
        let item = TextItem::new("re\u{0301}sume\u{0301}", SourceTag::PlainFallback);
        assert_eq!(item.text, "résumé");
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = ExtractorRegistry::with_defaults();
        assert!(registry.supports("pdf"));
        assert!(registry.supports("PDF"));
        assert!(registry.supports("docx"));
        assert!(registry.supports("txt"));
        assert!(!registry.supports("png"));
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = ExtractorRegistry::with_defaults();
        assert!(registry.get_by_name("pdf").is_some());
        assert!(registry.get_by_name("docx").is_some());
        assert!(registry.get_by_name("text").is_some());
        assert!(registry.get_by_name("rtf").is_none());
    }

    #[test]
    fn test_registry_dispatches_on_content() {
        let registry = ExtractorRegistry::with_defaults();
        // Text content with a misleading extension still extracts.
        let doc = registry
            .extract_bytes(b"Jane Doe\nExperience\nBuilt things over many years of work", "resume.dat")
            .unwrap();
        assert_eq!(doc.source.format, SourceFormat::PlainText);
        assert!(!doc.items.is_empty());
    }

    #[test]
    fn test_visible_char_count() {
        let mut doc = IntermediateDocument::new(SourceInfo::new("a.txt", SourceFormat::PlainText));
        doc.items
            .push(TextItem::new("ab cd", SourceTag::PlainFallback));
        doc.items.push(TextItem::new("  \t", SourceTag::PlainFallback));
        assert_eq!(doc.visible_char_count(), 4);
    }
}
