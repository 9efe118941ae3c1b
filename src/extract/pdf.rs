//! PDF extractor built on lopdf.
//!
//! Recovers positioned text spans by walking each page's content stream,
//! decoding show-text operands through the page's font encodings. Native
//! `/Annots` link annotations are harvested separately; they are the
//! highest-confidence source for contact links because the target URI is
//! machine-encoded rather than pattern-matched. Pages whose content
//! stream yields no spans fall back to whole-page text extraction.

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::detect::SourceFormat;
use crate::error::{Error, Result};

use super::{
    Extractor, IntermediateDocument, LinkAnnotation, Position, SourceInfo, SourceTag, TextItem,
};

/// Kerning offsets at or below this (thousandths of an em) in a `TJ`
/// array represent an inter-word gap.
const TJ_WORD_GAP: f32 = -180.0;

/// PDF format extractor.
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for PdfExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn extract(&self, bytes: &[u8], file_name: &str) -> Result<IntermediateDocument> {
        let doc = LopdfDocument::load_mem(bytes).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Corrupt("document is encrypted".to_string()),
            other => Error::from(other),
        })?;

        if doc.is_encrypted() {
            return Err(Error::Corrupt("document is encrypted".to_string()));
        }

        let mut source = SourceInfo::new(file_name, SourceFormat::Pdf);
        read_info_metadata(&doc, &mut source);

        let pages = doc.get_pages();
        source.page_count = pages.len() as u32;

        let mut intermediate = IntermediateDocument::new(source);

        for (&page_num, &page_id) in pages.iter() {
            let spans = collect_spans(&doc, page_num, page_id);
            if spans.is_empty() {
                // Content-stream walk found nothing (e.g. unusual text
                // operators); degrade to whole-page extraction.
                match doc.extract_text(&[page_num]) {
                    Ok(text) => {
                        for line in text.lines().filter(|l| !l.trim().is_empty()) {
                            intermediate
                                .items
                                .push(TextItem::new(line, SourceTag::PdfText));
                        }
                    }
                    Err(e) => {
                        log::warn!("failed to extract text from page {page_num}: {e}");
                    }
                }
            } else {
                intermediate.items.extend(spans);
            }

            intermediate
                .link_annotations
                .extend(collect_link_annotations(&doc, page_num, page_id));
        }

        Ok(intermediate)
    }
}

/// Read the trailer's Info dictionary into the source metadata.
fn read_info_metadata(doc: &LopdfDocument, source: &mut SourceInfo) {
    let Ok(info) = doc.trailer.get(b"Info") else {
        return;
    };
    let Ok(info_ref) = info.as_reference() else {
        return;
    };
    let Ok(info_dict) = doc.get_dictionary(info_ref) else {
        return;
    };

    source.title = get_string_from_dict(info_dict, b"Title");
    source.author = get_string_from_dict(info_dict, b"Author");
    if let Some(date) = get_string_from_dict(info_dict, b"CreationDate") {
        source.created = parse_pdf_date(&date);
    }
    if let Some(date) = get_string_from_dict(info_dict, b"ModDate") {
        source.modified = parse_pdf_date(&date);
    }
}

/// Minimal text-state machine for one page's content stream.
///
/// `line_x` tracks the line-matrix origin: `Td`/`T*` position the cursor
/// relative to the start of the current line, not to wherever the last
/// shown text ended.
struct TextState {
    x: f32,
    y: f32,
    line_x: f32,
    font_name: Vec<u8>,
    font_size: f32,
    leading: f32,
    in_text: bool,
}

impl TextState {
    fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            line_x: 0.0,
            font_name: Vec::new(),
            font_size: 12.0,
            leading: 14.0,
            in_text: false,
        }
    }

    fn next_line(&mut self) {
        self.y -= self.leading;
        self.x = self.line_x;
    }
}

/// Walk a page's content stream and return positioned text spans.
fn collect_spans(doc: &LopdfDocument, page_num: u32, page_id: ObjectId) -> Vec<TextItem> {
    let Ok(content_data) = page_content(doc, page_id) else {
        return Vec::new();
    };
    let Ok(content) = lopdf::content::Content::decode(&content_data) else {
        return Vec::new();
    };

    let mut state = TextState::new();
    let mut spans = Vec::new();

    for op in &content.operations {
        match op.operator.as_str() {
            "BT" => {
                state.in_text = true;
                state.x = 0.0;
                state.y = 0.0;
                state.line_x = 0.0;
            }
            "ET" => state.in_text = false,
            "Tf" => {
                if let Some(Object::Name(name)) = op.operands.first() {
                    state.font_name = name.clone();
                }
                if let Some(size) = op.operands.get(1).and_then(as_number) {
                    state.font_size = size;
                    state.leading = size * 1.2;
                }
            }
            "TL" => {
                if let Some(leading) = op.operands.first().and_then(as_number) {
                    state.leading = leading;
                }
            }
            "Td" | "TD" => {
                let tx = op.operands.first().and_then(as_number).unwrap_or(0.0);
                let ty = op.operands.get(1).and_then(as_number).unwrap_or(0.0);
                state.line_x += tx;
                state.x = state.line_x;
                state.y += ty;
                if op.operator == "TD" {
                    state.leading = -ty;
                }
            }
            "Tm" => {
                if let (Some(e), Some(f)) = (
                    op.operands.get(4).and_then(as_number),
                    op.operands.get(5).and_then(as_number),
                ) {
                    state.line_x = e;
                    state.x = e;
                    state.y = f;
                }
            }
            "T*" => state.next_line(),
            "Tj" | "'" | "\"" => {
                if op.operator != "Tj" {
                    state.next_line();
                }
                if let Some(Object::String(bytes, _)) = op
                    .operands
                    .iter()
                    .rev()
                    .find(|o| matches!(o, Object::String(_, _)))
                {
                    let text = decode_with_font(doc, page_id, &state.font_name, bytes);
                    push_span(&mut spans, &mut state, page_num, text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(parts)) = op.operands.first() {
                    let mut text = String::new();
                    for part in parts {
                        match part {
                            Object::String(bytes, _) => {
                                text.push_str(&decode_with_font(
                                    doc,
                                    page_id,
                                    &state.font_name,
                                    bytes,
                                ));
                            }
                            other => {
                                if let Some(offset) = as_number(other) {
                                    if offset <= TJ_WORD_GAP && !text.ends_with(' ') {
                                        text.push(' ');
                                    }
                                }
                            }
                        }
                    }
                    push_span(&mut spans, &mut state, page_num, text);
                }
            }
            _ => {}
        }
    }

    spans
}

/// Append a decoded span to the output and advance the text cursor.
fn push_span(spans: &mut Vec<TextItem>, state: &mut TextState, page: u32, text: String) {
    if !state.in_text || text.trim().is_empty() {
        return;
    }

    // Width estimate: half an em per character, the same fallback the
    // line assembler uses for gap measurement.
    let width = state.font_size * 0.5 * text.chars().count() as f32;
    spans.push(TextItem::positioned(
        text,
        SourceTag::PdfText,
        Position {
            page,
            x: state.x,
            y: state.y,
            width,
            height: state.font_size,
        },
    ));
    state.x += width;
}

/// Decode show-text bytes using the page font's encoding, falling back to
/// simple byte decoding when the font or encoding is unavailable.
fn decode_with_font(
    doc: &LopdfDocument,
    page_id: ObjectId,
    font_name: &[u8],
    bytes: &[u8],
) -> String {
    if !font_name.is_empty() {
        if let Ok(fonts) = doc.get_page_fonts(page_id) {
            if let Some(font_dict) = fonts.get(font_name) {
                if let Ok(encoding) = font_dict.get_font_encoding(doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&encoding, bytes) {
                        return text;
                    }
                }
            }
        }
    }
    decode_text_simple(bytes)
}

/// Simple text decoding when no font encoding is available: UTF-16BE with
/// BOM, then UTF-8, then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}

/// Concatenated, decompressed content stream bytes for a page.
fn page_content(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::Corrupt(e.to_string()))?;

    let contents = page_dict
        .get(b"Contents")
        .map_err(|e| Error::Corrupt(e.to_string()))?;

    match contents {
        Object::Reference(r) => {
            if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                return s
                    .decompressed_content()
                    .map_err(|e| Error::Corrupt(e.to_string()));
            }
            Err(Error::Corrupt("invalid content stream".to_string()))
        }
        Object::Array(arr) => {
            let mut content = Vec::new();
            for obj in arr {
                if let Object::Reference(r) = obj {
                    if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                        if let Ok(data) = s.decompressed_content() {
                            content.extend_from_slice(&data);
                            content.push(b' ');
                        }
                    }
                }
            }
            Ok(content)
        }
        Object::Stream(s) => s
            .decompressed_content()
            .map_err(|e| Error::Corrupt(e.to_string())),
        _ => Err(Error::Corrupt("invalid content stream".to_string())),
    }
}

/// Harvest `/Link` annotations with `/URI` actions from a page.
fn collect_link_annotations(
    doc: &LopdfDocument,
    page_num: u32,
    page_id: ObjectId,
) -> Vec<LinkAnnotation> {
    let mut annotations = Vec::new();

    let Ok(page_dict) = doc.get_dictionary(page_id) else {
        return annotations;
    };
    let Ok(annots) = page_dict.get(b"Annots") else {
        return annotations;
    };

    let entries = match annots {
        Object::Array(arr) => arr.clone(),
        Object::Reference(r) => match doc.get_object(*r) {
            Ok(Object::Array(arr)) => arr.clone(),
            _ => return annotations,
        },
        _ => return annotations,
    };

    for entry in &entries {
        let dict = match entry {
            Object::Reference(r) => match doc.get_dictionary(*r) {
                Ok(d) => d,
                Err(_) => continue,
            },
            Object::Dictionary(d) => d,
            _ => continue,
        };

        let is_link = matches!(
            dict.get(b"Subtype").ok().and_then(|s| s.as_name().ok()),
            Some(b"Link")
        );
        if !is_link {
            continue;
        }

        let action = match dict.get(b"A") {
            Ok(Object::Dictionary(a)) => Some(a.clone()),
            Ok(Object::Reference(r)) => doc.get_dictionary(*r).ok().cloned(),
            _ => None,
        };
        let Some(action) = action else { continue };

        let is_uri = matches!(
            action.get(b"S").ok().and_then(|s| s.as_name().ok()),
            Some(b"URI")
        );
        if !is_uri {
            continue;
        }

        if let Ok(Object::String(bytes, _)) = action.get(b"URI") {
            let url = decode_text_simple(bytes);
            if !url.trim().is_empty() {
                annotations.push(LinkAnnotation {
                    url: url.trim().to_string(),
                    page: page_num,
                });
            }
        }
    }

    annotations
}

/// Helper to get a string from a PDF dictionary, handling UTF-16BE.
fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => {
            let s = decode_text_simple(bytes);
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        }
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    })
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSS...).
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = s.strip_prefix("D:")?;

    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| chrono::DateTime::from_naive_utc_and_offset(dt, chrono::Utc))
}

/// Extract a number from a content-stream operand.
fn as_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_pdf_date() {
        let date = parse_pdf_date("D:20240115103045").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_pdf_date_minimal() {
        let date = parse_pdf_date("D:2024").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 1);
    }

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        let bytes = vec![0x48, 0x65, 0x6C, 0x6C, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Hellé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        let bytes = vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }

    #[test]
    fn test_extract_rejects_garbage() {
        let extractor = PdfExtractor::new();
        let result = extractor.extract(b"%PDF-1.4 but nothing else", "resume.pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_as_number() {
        assert_eq!(as_number(&Object::Integer(42)), Some(42.0));
        assert_eq!(as_number(&Object::Real(3.5)), Some(3.5));
        assert_eq!(as_number(&Object::Name(b"x".to_vec())), None);
    }
}
