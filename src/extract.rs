//! The extractor: open a document, read every page in order, join the text.
//!
//! Text is accumulated in memory and returned only once every page has been
//! read. A failure on any page discards what was collected so far.

use crate::config::ExtractionConfig;
use crate::error::ExtractionError;
use crate::output::ExtractionOutput;
use crate::reader::{PdfReader, PdfiumReader};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How far into the file the `%PDF` marker may appear.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Extract the text of every page of the PDF at `path`.
///
/// The input is checked before PDFium is bound, so a missing or non-PDF
/// file fails fast without locating or downloading the engine.
///
/// # Errors
/// Any failure to read the file, bind PDFium, open the document or extract
/// a page.
pub fn extract_text(
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractionError> {
    let path = path.as_ref();
    validate_input(path)?;

    let pdfium = pdfium_auto::bind(&config.bind_options())?;
    let reader = PdfiumReader::new(pdfium);
    read_document(&reader, path, config)
}

/// Same as [`extract_text`] but with a caller-supplied reader.
pub fn extract_with<R>(
    reader: &R,
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractionError>
where
    R: PdfReader + ?Sized,
{
    let path = path.as_ref();
    validate_input(path)?;
    read_document(reader, path, config)
}

fn read_document<R>(
    reader: &R,
    path: &Path,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractionError>
where
    R: PdfReader + ?Sized,
{
    let start = Instant::now();
    let document = reader.open(path, config.password.as_deref())?;
    let page_count = document.page_count();

    let mut text = String::new();
    let mut empty_pages = 0;
    for index in 0..page_count {
        let page_text = document.page_text(index)?;
        if page_text.is_empty() {
            empty_pages += 1;
        }
        text.push_str(&page_text);
        text.push('\n');
    }

    let duration_ms = whole_millis(start.elapsed());
    info!(
        "Extracted {} pages ({} empty) in {}ms",
        page_count, empty_pages, duration_ms
    );

    Ok(ExtractionOutput {
        text,
        page_count,
        empty_pages,
        duration_ms,
    })
}

/// Milliseconds in `d`, saturating at `u64::MAX`.
fn whole_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Check the file exists, is readable and carries a `%PDF` header.
fn validate_input(path: &Path) -> Result<(), ExtractionError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ExtractionError::FileNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => ExtractionError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ExtractionError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut head = Vec::with_capacity(HEADER_SEARCH_WINDOW);
    file.take(HEADER_SEARCH_WINDOW as u64)
        .read_to_end(&mut head)
        .map_err(|e| ExtractionError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        })?;

    if !head.windows(4).any(|w| w == b"%PDF") {
        return Err(ExtractionError::NotAPdf {
            path: path.to_path_buf(),
            magic: head.iter().take(4).copied().collect(),
        });
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(())
}
