//! Error type for the pdftext library.
//!
//! Every failure while opening, parsing or reading a document is an
//! [`ExtractionError`]. Callers are not expected to branch on the variant:
//! the CLI prints any of them as a single `Error: <message>` line. The
//! variants exist so that message says something useful.

use std::path::PathBuf;
use thiserror::Error;

/// Any failure that prevents a document's text from being produced.
#[derive(Debug, Error)]
pub enum ExtractionError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("No such file or directory: '{}'", path.display())]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied: '{}'", path.display())]
    PermissionDenied { path: PathBuf },

    /// Any other I/O failure while reading the input.
    #[error("Cannot read '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but does not start with the `%PDF` marker.
    #[error("'{}' is not a PDF file (starts with {magic:?})", path.display())]
    NotAPdf { path: PathBuf, magic: Vec<u8> },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF requires a password but none was provided.
    #[error("'{}' is encrypted and requires a password (use --password)", path.display())]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for '{}'", path.display())]
    WrongPassword { path: PathBuf },

    /// The PDF reader rejected the document.
    #[error("Could not read PDF '{}': {detail}", path.display())]
    CorruptPdf { path: PathBuf, detail: String },

    /// Text extraction failed on one page (1-indexed).
    #[error("Failed to extract text from page {page}: {detail}")]
    PageText { page: usize, detail: String },

    // ── Engine errors ─────────────────────────────────────────────────────
    /// PDFium could not be located, downloaded or loaded.
    #[error("PDF engine unavailable: {0}")]
    EngineUnavailable(#[from] pdfium_auto::PdfiumAutoError),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
