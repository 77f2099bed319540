//! CLI binary for pdftext.
//!
//! A thin shim over the library crate: maps flags to `ExtractionConfig`,
//! runs the extraction and prints either the text or one error line.

use anyhow::{Context, Result};
use clap::Parser;
use pdftext::{extract_text, write_outcome, ExtractionConfig};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Printed on stdout when no input path is given.
const USAGE: &str = "Usage: python extract_pdf.py <pdf_path>";

const AFTER_HELP: &str = r#"EXAMPLES:
  # Print the text of every page
  extract_pdf report.pdf

  # Encrypted document
  extract_pdf --password s3cret statement.pdf

  # Use an existing libpdfium, never download
  extract_pdf --pdfium-lib /opt/pdfium/lib/libpdfium.so --offline report.pdf

OUTPUT:
  Each page's text is followed by a newline; the whole text is printed once
  after every page was read. On failure a single "Error: <message>" line is
  written to stderr and the exit status is 1.

ENVIRONMENT VARIABLES:
  PDFTEXT_PASSWORD        PDF user password
  PDFIUM_LIB_PATH         Path to an existing libpdfium
  PDFIUM_AUTO_CACHE_DIR   Override the PDFium download cache directory
  PDFTEXT_OFFLINE         Never download PDFium
  RUST_LOG                Tracing filter (overrides -v / -q)

  PDFium (~30 MB) is downloaded on first use when no library is found and
  cached in ~/.cache/pdftext/pdfium-7690/.
"#;

/// Extract the text of every page of a PDF.
#[derive(Parser, Debug)]
#[command(
    name = "extract_pdf",
    version,
    about = "Extract the text of every page of a PDF",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path. Arguments after the first are ignored.
    #[arg(
        value_name = "PDF_PATH",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    paths: Vec<PathBuf>,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDFTEXT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Path to an existing libpdfium shared library.
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Directory for the downloaded PDFium cache.
    #[arg(long, env = "PDFIUM_AUTO_CACHE_DIR")]
    pdfium_cache_dir: Option<PathBuf>,

    /// Never download PDFium; fail if no local library is found.
    #[arg(long, env = "PDFTEXT_OFFLINE")]
    offline: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFTEXT_VERBOSE")]
    verbose: bool,

    /// Suppress all logs; only the text or the error line is printed.
    #[arg(short, long, env = "PDFTEXT_QUIET", conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Default to WARN so stderr carries nothing but the error line.
    let filter = if cli.quiet {
        "off"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let Some(pdf_path) = cli.paths.first() else {
        println!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    };
    if cli.paths.len() > 1 {
        tracing::debug!("ignoring {} extra argument(s)", cli.paths.len() - 1);
    }

    let config = build_config(cli)?;
    tracing::debug!("{:?}", config);

    let outcome = extract_text(pdf_path, &config);
    if let Ok(ref output) = outcome {
        tracing::debug!(
            "{} pages, {} empty, {} bytes in {}ms",
            output.page_count,
            output.empty_pages,
            output.text.len(),
            output.duration_ms
        );
    }

    let stdout = io::stdout();
    let stderr = io::stderr();
    write_outcome(&outcome, &mut stdout.lock(), &mut stderr.lock())
        .context("Failed to write output")?;

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Map CLI args to `ExtractionConfig`.
fn build_config(cli: &Cli) -> Result<ExtractionConfig> {
    let mut builder = ExtractionConfig::builder().allow_download(!cli.offline);

    if let Some(ref password) = cli.password {
        builder = builder.password(password.clone());
    }
    if let Some(ref lib) = cli.pdfium_lib {
        builder = builder.pdfium_library(lib.clone());
    }
    if let Some(ref dir) = cli.pdfium_cache_dir {
        builder = builder.pdfium_cache_dir(dir.clone());
    }

    builder.build().context("Bad command-line options")
}
