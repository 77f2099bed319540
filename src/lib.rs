//! # pdftext
//!
//! Extract the plain text of every page of a PDF document.
//!
//! Parsing, font decoding and layout reconstruction are delegated to
//! [PDFium](https://pdfium.googlesource.com/pdfium/) through `pdfium-render`.
//! This crate opens the document, reads its pages front to back and joins
//! their text, one trailing newline per page.
//!
//! ## Pipeline Overview
//!
//! ```text
//! path
//!  │
//!  ├─ 1. Input    file exists, is readable, carries a %PDF header
//!  ├─ 2. Engine   bind libpdfium (explicit path, cache, system, download)
//!  ├─ 3. Open     parse the document, password if encrypted
//!  ├─ 4. Pages    text of each page in order, "" for pages without text
//!  └─ 5. Output   "page1\npage2\n…" returned only after every page succeeded
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdftext::{extract_text, ExtractionConfig};
//!
//! let output = extract_text("document.pdf", &ExtractionConfig::default())?;
//! print!("{}", output.text);
//! eprintln!("{} pages", output.page_count);
//! # Ok::<(), pdftext::ExtractionError>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `extract_pdf` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod reader;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder};
pub use error::ExtractionError;
pub use extract::{extract_text, extract_with};
pub use output::{write_outcome, ExtractionOutput};
pub use reader::{PdfDocument, PdfReader, PdfiumReader};
