//! Error types for the atslens library.
//!
//! Every variant is recoverable at the API boundary: extraction failures
//! stop the pipeline before a document model exists, and the caller is
//! expected to surface a "try pasting the text manually" fallback. Once a
//! [`DocumentModel`](crate::model::DocumentModel) has been built, the
//! remaining stages are total functions and never error.

use std::io;
use thiserror::Error;

/// Result type alias for atslens operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning file bytes into a document model.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading files (CLI and test helpers only; the core
    /// pipeline operates on in-memory bytes).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file extension or byte content is not a supported document
    /// format.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The binary content is malformed, truncated, or encrypted beyond
    /// recovery.
    #[error("Corrupt document: {0}")]
    Corrupt(String),

    /// Extraction succeeded but produced too little text to analyze.
    #[error("Extracted text too short ({0} visible characters)")]
    EmptyOrTooShort(usize),

    /// The host-imposed extraction deadline elapsed. The core never raises
    /// this itself; it exists so callers can map a wall-clock timeout into
    /// the same recoverable taxonomy.
    #[error("Extraction timed out")]
    Timeout,
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => {
                Error::Corrupt("document is encrypted".to_string())
            }
            _ => Error::Corrupt(err.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Corrupt(format!("invalid OOXML container: {err}"))
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Corrupt(format!("invalid document XML: {err}"))
    }
}
