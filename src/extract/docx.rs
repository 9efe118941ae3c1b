//! Word-document extractor built on zip + quick-xml.
//!
//! OOXML stores the body as `word/document.xml` inside a zip container.
//! The extractor streams that XML and emits one flat text item per
//! paragraph: no coordinates survive the format's reconstruction, and
//! hyperlinks live in a separate relationships part rather than inline,
//! so contact channels must be regex-recovered downstream. Both losses
//! are why this source's confidence ceiling sits below the PDF path.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::detect::SourceFormat;
use crate::error::{Error, Result};

use super::{Extractor, IntermediateDocument, SourceInfo, SourceTag, TextItem};

/// Word-document (OOXML) extractor.
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for DocxExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn extract(&self, bytes: &[u8], file_name: &str) -> Result<IntermediateDocument> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let body_xml = read_archive_file(&mut archive, "word/document.xml")?
            .ok_or_else(|| Error::Corrupt("no word/document.xml in container".to_string()))?;

        let mut source = SourceInfo::new(file_name, SourceFormat::Docx);
        if let Some(core_xml) = read_archive_file(&mut archive, "docProps/core.xml")? {
            read_core_properties(&core_xml, &mut source);
        }

        let mut intermediate = IntermediateDocument::new(source);
        for paragraph in read_paragraphs(&body_xml)? {
            intermediate
                .items
                .push(TextItem::new(paragraph, SourceTag::DocxText));
        }

        Ok(intermediate)
    }
}

/// Read one archive member as UTF-8, or `None` when absent.
fn read_archive_file(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<Option<String>> {
    match archive.by_name(name) {
        Ok(mut file) => {
            let mut content = String::new();
            file.read_to_string(&mut content)
                .map_err(|e| Error::Corrupt(format!("{name}: {e}")))?;
            Ok(Some(content))
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Stream `word/document.xml` into a flat list of paragraph strings.
///
/// `<w:t>` runs accumulate into the open paragraph; `<w:tab/>` becomes a
/// tab (visible to the table heuristics downstream) and `<w:br/>` splits
/// the paragraph the way a rendered line break would.
fn read_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match local_name(e.name().as_ref()) {
                b"p" => current.clear(),
                b"t" => in_text_run = true,
                _ => {}
            },
            Event::Empty(e) => match local_name(e.name().as_ref()) {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => flush(&mut current, &mut paragraphs),
                _ => {}
            },
            Event::Text(t) => {
                if in_text_run {
                    current.push_str(&t.unescape().unwrap_or_default());
                }
            }
            Event::End(e) => match local_name(e.name().as_ref()) {
                b"t" => in_text_run = false,
                b"p" => flush(&mut current, &mut paragraphs),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    flush(&mut current, &mut paragraphs);
    Ok(paragraphs)
}

/// Push a finished paragraph, skipping whitespace-only ones.
fn flush(current: &mut String, paragraphs: &mut Vec<String>) {
    if !current.trim().is_empty() {
        paragraphs.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Element name without its namespace prefix.
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().rposition(|&b| b == b':') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// Read `dc:title` / `dc:creator` from `docProps/core.xml`.
fn read_core_properties(xml: &str, source: &mut SourceInfo) {
    let Ok(values) = read_simple_elements(xml, &[b"title", b"creator"]) else {
        return;
    };
    if let Some(title) = values.first().filter(|v| !v.is_empty()) {
        source.title = Some(title.clone());
    }
    if let Some(author) = values.get(1).filter(|v| !v.is_empty()) {
        source.author = Some(author.clone());
    }
}

/// Collect the text content of the first occurrence of each named element.
fn read_simple_elements(xml: &str, names: &[&[u8]]) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut values = vec![String::new(); names.len()];
    let mut open: Option<usize> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                open = names
                    .iter()
                    .position(|n| *n == local_name(e.name().as_ref()));
            }
            Event::Text(t) => {
                if let Some(idx) = open {
                    if values[idx].is_empty() {
                        values[idx] = t.unescape().unwrap_or_default().trim().to_string();
                    }
                }
            }
            Event::End(_) => open = None,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Build an in-memory docx with the given document.xml body.
    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            let options = SimpleFileOptions::default();
            writer.start_file("word/document.xml", options).unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    const SIMPLE_DOC: &str = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t>Senior </w:t></w:r><w:r><w:t>Engineer</w:t></w:r></w:p>
    <w:p><w:r><w:t>2019</w:t><w:tab/><w:t>2023</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">  </w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_extract_paragraphs() {
        let bytes = docx_bytes(SIMPLE_DOC);
        let doc = DocxExtractor::new().extract(&bytes, "resume.docx").unwrap();

        let texts: Vec<&str> = doc.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["Jane Doe", "Senior Engineer", "2019\t2023"]);
        assert!(doc.items.iter().all(|i| i.source == SourceTag::DocxText));
        assert!(doc.link_annotations.is_empty());
    }

    #[test]
    fn test_extract_missing_body_is_corrupt() {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            let options = SimpleFileOptions::default();
            writer.start_file("unrelated.txt", options).unwrap();
            writer.write_all(b"nope").unwrap();
            writer.finish().unwrap();
        }
        let bytes = cursor.into_inner();

        let result = DocxExtractor::new().extract(&bytes, "resume.docx");
        assert!(matches!(result, Err(Error::Corrupt(_))));
    }

    #[test]
    fn test_extract_not_a_zip() {
        let result = DocxExtractor::new().extract(b"plain text", "resume.docx");
        assert!(matches!(result, Err(Error::Corrupt(_))));
    }

    #[test]
    fn test_line_break_splits_paragraph() {
        let xml = r#"<w:document xmlns:w="x"><w:body>
            <w:p><w:r><w:t>first</w:t><w:br/><w:t>second</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let paragraphs = read_paragraphs(xml).unwrap();
        assert_eq!(paragraphs, vec!["first", "second"]);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"w:p"), b"p");
        assert_eq!(local_name(b"p"), b"p");
    }
}
