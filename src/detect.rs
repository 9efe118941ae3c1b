//! Source format detection and validation.
//!
//! Detection combines magic bytes with the declared file name. Unknown but
//! text-like content degrades to the plain-text fallback rather than
//! failing outright; only recognizably foreign formats (images, archives)
//! and binary garbage are rejected.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Detected source format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// PDF document with positioned text and native link annotations.
    Pdf,
    /// Word document (OOXML); flat paragraph stream, no coordinates.
    Docx,
    /// Raw text fallback for anything else that decodes as UTF-8.
    PlainText,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Pdf => write!(f, "pdf"),
            SourceFormat::Docx => write!(f, "docx"),
            SourceFormat::PlainText => write!(f, "plain-text"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
/// ZIP local file header, the container for every OOXML document.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Extensions that are recognizably not documents; these are rejected
/// rather than fed to the plain-text fallback.
const FOREIGN_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "svg", "ico", "zip", "gz", "tar", "7z", "rar",
    "exe", "dll", "so", "mp3", "mp4", "mov", "avi",
];

/// Detect the source format from bytes and the declared file name.
///
/// # Arguments
/// * `data` - File content (at least the first few bytes)
/// * `file_name` - Declared name, used for its extension
///
/// # Returns
/// * `Ok(SourceFormat)` for PDF, DOCX, or text-like content
/// * `Err(Error::UnsupportedFormat)` for recognizably foreign formats
/// * `Err(Error::Corrupt)` when a document extension does not match its
///   magic bytes and the content is not text either
pub fn detect_format_from_bytes(data: &[u8], file_name: &str) -> Result<SourceFormat> {
    if data.is_empty() {
        return Err(Error::EmptyOrTooShort(0));
    }

    let ext = extension_of(file_name);

    if data.starts_with(PDF_MAGIC) {
        return Ok(SourceFormat::Pdf);
    }

    if data.starts_with(ZIP_MAGIC) {
        // A bare .zip is not a document; OOXML is a zip with a docx name.
        if ext.as_deref() == Some("zip") {
            return Err(Error::UnsupportedFormat("zip".to_string()));
        }
        return Ok(SourceFormat::Docx);
    }

    if let Some(ext) = ext.as_deref() {
        if FOREIGN_EXTENSIONS.contains(&ext) {
            return Err(Error::UnsupportedFormat(ext.to_string()));
        }
        // Declared a document format but the magic bytes disagree and the
        // content is not text: the file is damaged, not unsupported.
        if (ext == "pdf" || ext == "docx") && !looks_like_text(data) {
            return Err(Error::Corrupt(format!(
                "{ext} extension without a valid {ext} header"
            )));
        }
    }

    if looks_like_text(data) {
        return Ok(SourceFormat::PlainText);
    }

    Err(Error::UnsupportedFormat(
        ext.unwrap_or_else(|| "unknown".to_string()),
    ))
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Check if bytes start with a ZIP local file header (OOXML container).
pub fn is_docx_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}

/// Lowercased extension of a file name, if any.
pub(crate) fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Heuristic: content is text-like when a sample decodes as UTF-8 with
/// few control characters.
fn looks_like_text(data: &[u8]) -> bool {
    let sample = &data[..data.len().min(4096)];
    match std::str::from_utf8(sample) {
        Ok(s) => {
            let control = s
                .chars()
                .filter(|c| c.is_control() && *c != '\n' && *c != '\r' && *c != '\t')
                .count();
            control * 50 < s.chars().count().max(1)
        }
        // A multi-byte char may be cut at the sample boundary; retry on
        // the valid prefix.
        Err(e) if e.valid_up_to() + 4 >= sample.len() && e.valid_up_to() > 0 => {
            std::str::from_utf8(&sample[..e.valid_up_to()]).is_ok()
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        let format = detect_format_from_bytes(data, "resume.pdf").unwrap();
        assert_eq!(format, SourceFormat::Pdf);
    }

    #[test]
    fn test_detect_pdf_despite_extension() {
        // Magic bytes win over a misleading name.
        let data = b"%PDF-1.4\ncontent";
        let format = detect_format_from_bytes(data, "resume.txt").unwrap();
        assert_eq!(format, SourceFormat::Pdf);
    }

    #[test]
    fn test_detect_docx() {
        let data = b"PK\x03\x04rest-of-archive";
        let format = detect_format_from_bytes(data, "resume.docx").unwrap();
        assert_eq!(format, SourceFormat::Docx);
    }

    #[test]
    fn test_detect_plain_text() {
        let data = b"Jane Doe\njane@example.com\nExperience\n";
        let format = detect_format_from_bytes(data, "resume.txt").unwrap();
        assert_eq!(format, SourceFormat::PlainText);
    }

    #[test]
    fn test_detect_unknown_extension_text_falls_back() {
        let data = b"Some resume text pasted from a word processor";
        let format = detect_format_from_bytes(data, "resume.dat").unwrap();
        assert_eq!(format, SourceFormat::PlainText);
    }

    #[test]
    fn test_detect_image_rejected() {
        let data = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let result = detect_format_from_bytes(data, "photo.png");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_detect_corrupt_pdf() {
        let data = &[0xFF, 0xFE, 0x00, 0x01, 0x02, 0x03];
        let result = detect_format_from_bytes(data, "resume.pdf");
        assert!(matches!(result, Err(Error::Corrupt(_))));
    }

    #[test]
    fn test_detect_empty() {
        let result = detect_format_from_bytes(&[], "resume.pdf");
        assert!(matches!(result, Err(Error::EmptyOrTooShort(0))));
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\ntest"));
        assert!(!is_pdf_bytes(b"Not a PDF file"));
        assert!(!is_pdf_bytes(b""));
    }

    #[test]
    fn test_is_docx_bytes() {
        assert!(is_docx_bytes(b"PK\x03\x04"));
        assert!(!is_docx_bytes(b"PK\x05\x06"));
    }
}
