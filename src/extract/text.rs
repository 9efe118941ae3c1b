//! Plain-text fallback extractor.
//!
//! Used for pasted text and for unrecognized byte content. Decoding is
//! lossy and never fails; the cost of the graceful degradation is the
//! lowest confidence tier on everything recovered this way.

use crate::detect::SourceFormat;
use crate::error::Result;

use super::{Extractor, IntermediateDocument, SourceInfo, SourceTag, TextItem};

/// Raw-text extractor of last resort.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for PlainTextExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text", "md"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn extract(&self, bytes: &[u8], file_name: &str) -> Result<IntermediateDocument> {
        let text = String::from_utf8_lossy(bytes);

        let mut intermediate =
            IntermediateDocument::new(SourceInfo::new(file_name, SourceFormat::PlainText));

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            intermediate
                .items
                .push(TextItem::new(line, SourceTag::PlainFallback));
        }

        Ok(intermediate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_lines() {
        let doc = PlainTextExtractor::new()
            .extract(b"Jane Doe\n\nExperience\n", "resume.txt")
            .unwrap();

        let texts: Vec<&str> = doc.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["Jane Doe", "Experience"]);
        assert!(doc
            .items
            .iter()
            .all(|i| i.source == SourceTag::PlainFallback));
    }

    #[test]
    fn test_extract_invalid_utf8_is_lossy_not_fatal() {
        let doc = PlainTextExtractor::new()
            .extract(b"Jane \xFF Doe", "resume.txt")
            .unwrap();
        assert_eq!(doc.items.len(), 1);
        assert!(doc.items[0].text.contains("Jane"));
    }

    #[test]
    fn test_extract_empty_input() {
        let doc = PlainTextExtractor::new().extract(b"", "resume.txt").unwrap();
        assert!(doc.items.is_empty());
        assert_eq!(doc.visible_char_count(), 0);
    }
}
