//! Extraction results and the single place they are printed.

use crate::error::ExtractionError;
use std::io::{self, Write};

/// The text of a whole document plus a few counters.
#[derive(Debug, Clone)]
pub struct ExtractionOutput {
    /// Every page's text followed by `'\n'`, in page order.
    pub text: String,
    /// Pages in the document.
    pub page_count: usize,
    /// Pages that produced no text at all.
    pub empty_pages: usize,
    /// Wall-clock time spent opening and reading the document.
    pub duration_ms: u64,
}

/// Print an extraction outcome.
///
/// On success the text goes to `stdout` followed by one more newline, the
/// way a line-oriented print would emit it. On failure a single
/// `Error: <message>` line goes to `stderr`. Nothing is written to the other
/// stream, and the text is written in one call only after the whole document
/// has been read, so a failed extraction never leaves partial output.
pub fn write_outcome<O, E>(
    outcome: &Result<ExtractionOutput, ExtractionError>,
    stdout: &mut O,
    stderr: &mut E,
) -> io::Result<()>
where
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    match outcome {
        Ok(output) => {
            stdout.write_all(output.text.as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush()
        }
        Err(e) => {
            writeln!(stderr, "Error: {e}")?;
            stderr.flush()
        }
    }
}
