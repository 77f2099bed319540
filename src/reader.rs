//! The PDF-reading collaborator.
//!
//! The extractor needs exactly two things from a PDF library: open a
//! document from a path, and get the text of one page. [`PdfReader`] and
//! [`PdfDocument`] capture that, so the extractor never names pdfium types
//! and tests can substitute a scripted reader.
//!
//! [`PdfiumReader`] is the production implementation. pdfium-render wraps
//! the pdfium C++ library, which owns parsing, fonts and layout.

use crate::error::ExtractionError;
use pdfium_render::prelude::Pdfium;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Opens documents.
pub trait PdfReader {
    /// Open and parse the file at `path`.
    ///
    /// The returned document borrows the reader and is dropped at the end of
    /// the extraction call.
    fn open<'a>(
        &'a self,
        path: &Path,
        password: Option<&'a str>,
    ) -> Result<Box<dyn PdfDocument + 'a>, ExtractionError>;
}

/// An opened document.
pub trait PdfDocument {
    fn page_count(&self) -> usize;

    /// Text of the page at 0-based `index`. A page without text yields `""`.
    fn page_text(&self, index: usize) -> Result<String, ExtractionError>;
}

/// [`PdfReader`] backed by a bound pdfium library.
pub struct PdfiumReader {
    pdfium: Pdfium,
}

impl PdfiumReader {
    pub fn new(pdfium: Pdfium) -> Self {
        Self { pdfium }
    }
}

impl PdfReader for PdfiumReader {
    fn open<'a>(
        &'a self,
        path: &Path,
        password: Option<&'a str>,
    ) -> Result<Box<dyn PdfDocument + 'a>, ExtractionError> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, password)
            .map_err(|e| classify_open_error(path, password.is_some(), format!("{:?}", e)))?;

        info!(
            "PDF loaded: {} ({} pages)",
            path.display(),
            document.pages().len()
        );

        Ok(Box::new(PdfiumDocument {
            document,
            path: path.to_path_buf(),
        }))
    }
}

struct PdfiumDocument<'a> {
    document: pdfium_render::prelude::PdfDocument<'a>,
    path: PathBuf,
}

impl PdfDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_text(&self, index: usize) -> Result<String, ExtractionError> {
        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|e| ExtractionError::PageText {
                page: index + 1,
                detail: format!("{:?}", e),
            })?;

        let text = page.text().map_err(|e| ExtractionError::PageText {
            page: index + 1,
            detail: format!("{:?}", e),
        })?;

        let all = text.all();
        debug!(
            "{}: page {} → {} chars",
            self.path.display(),
            index + 1,
            all.chars().count()
        );
        Ok(all)
    }
}

/// Map a pdfium load failure onto the matching [`ExtractionError`].
///
/// pdfium reports a missing or wrong password through the same error
/// value, so the password cases are told apart by whether one was given.
fn classify_open_error(path: &Path, had_password: bool, detail: String) -> ExtractionError {
    if detail.contains("Password") || detail.contains("password") {
        if had_password {
            ExtractionError::WrongPassword {
                path: path.to_path_buf(),
            }
        } else {
            ExtractionError::PasswordRequired {
                path: path.to_path_buf(),
            }
        }
    } else {
        ExtractionError::CorruptPdf {
            path: path.to_path_buf(),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_error_without_password_asks_for_one() {
        let e = classify_open_error(
            Path::new("locked.pdf"),
            false,
            "PdfiumLibraryInternalError(PasswordError)".into(),
        );
        assert!(matches!(e, ExtractionError::PasswordRequired { .. }));
    }

    #[test]
    fn password_error_with_password_is_wrong_password() {
        let e = classify_open_error(
            Path::new("locked.pdf"),
            true,
            "PdfiumLibraryInternalError(PasswordError)".into(),
        );
        assert!(matches!(e, ExtractionError::WrongPassword { .. }));
    }

    #[test]
    fn other_errors_are_corrupt_pdf() {
        let e = classify_open_error(
            Path::new("broken.pdf"),
            false,
            "PdfiumLibraryInternalError(FormatError)".into(),
        );
        match e {
            ExtractionError::CorruptPdf { path, detail } => {
                assert_eq!(path, PathBuf::from("broken.pdf"));
                assert!(detail.contains("FormatError"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
