//! # pdfium-auto
//!
//! Find a usable [PDFium](https://pdfium.googlesource.com/pdfium/) shared
//! library for `pdfium-render`, fetching one when the machine has none.
//!
//! ## Resolution order
//!
//! [`bind`] tries each source in turn and binds the first that loads:
//!
//! 1. [`BindOptions::library_path`], an explicit path to libpdfium.
//! 2. The per-version cache directory (see [`cache_dir`]).
//! 3. The platform's system library search path.
//! 4. A download of the platform archive from
//!    [bblanchon/pdfium-binaries](https://github.com/bblanchon/pdfium-binaries),
//!    extracted into the cache. Skipped when
//!    [`BindOptions::allow_download`] is `false`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pdfium_auto::{bind, BindOptions};
//!
//! let pdfium = bind(&BindOptions::default()).expect("PDFium unavailable");
//! ```
//!
//! ## Platform support
//!
//! | OS      | Arch    | Library               |
//! |---------|---------|-----------------------|
//! | macOS   | arm64   | `libpdfium.dylib`     |
//! | macOS   | x86_64  | `libpdfium.dylib`     |
//! | Linux   | x86_64  | `libpdfium.so`        |
//! | Linux   | aarch64 | `libpdfium.so`        |
//! | Windows | x86_64  | `pdfium.dll`          |
//! | Windows | aarch64 | `pdfium.dll`          |
//! | Windows | x86     | `pdfium.dll`          |

use std::path::{Path, PathBuf};

use pdfium_render::prelude::Pdfium;
use thiserror::Error;
use tracing::{debug, info, warn};

// ── Public constants ─────────────────────────────────────────────────────────

/// The pdfium-binaries release tag used for downloads.
pub const PDFIUM_VERSION: &str = "7690";

const BASE_URL: &str = "https://github.com/bblanchon/pdfium-binaries/releases/download";

/// Directory name under the user cache root.
const CACHE_NAMESPACE: &str = "pdftext";

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned while locating or loading PDFium.
#[derive(Error, Debug)]
pub enum PdfiumAutoError {
    /// No prebuilt PDFium exists for this OS/architecture.
    #[error("Unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// No library was found and downloading is disabled.
    #[error("PDFium library not found (looked for '{}' and the system library path); downloading is disabled", expected.display())]
    NotFound { expected: PathBuf },

    /// Could not create the local cache directory.
    #[error("Cache directory error: {0}")]
    CacheDir(#[source] std::io::Error),

    /// Network download failed.
    #[error("Download failed: {0}")]
    Download(String),

    /// gzip/tar extraction failed.
    #[error("Archive extraction failed: {0}")]
    Extract(String),

    /// The library file exists but could not be loaded.
    #[error("Failed to bind PDFium from '{}': {reason}", path.display())]
    Bind { path: PathBuf, reason: String },
}

// ── Platform table ───────────────────────────────────────────────────────────

/// Where to find libpdfium for one OS/architecture pair.
#[derive(Debug, PartialEq, Eq)]
pub struct Platform {
    os: &'static str,
    arch: &'static str,
    /// Release asset, e.g. `pdfium-linux-x64.tgz`.
    pub archive: &'static str,
    /// Path of the library inside the archive.
    pub member: &'static str,
    /// File name on disk.
    pub file_name: &'static str,
}

const PLATFORMS: &[Platform] = &[
    Platform { os: "macos", arch: "aarch64", archive: "pdfium-mac-arm64.tgz", member: "lib/libpdfium.dylib", file_name: "libpdfium.dylib" },
    Platform { os: "macos", arch: "x86_64", archive: "pdfium-mac-x64.tgz", member: "lib/libpdfium.dylib", file_name: "libpdfium.dylib" },
    Platform { os: "linux", arch: "x86_64", archive: "pdfium-linux-x64.tgz", member: "lib/libpdfium.so", file_name: "libpdfium.so" },
    Platform { os: "linux", arch: "aarch64", archive: "pdfium-linux-arm64.tgz", member: "lib/libpdfium.so", file_name: "libpdfium.so" },
    Platform { os: "windows", arch: "x86_64", archive: "pdfium-win-x64.tgz", member: "bin/pdfium.dll", file_name: "pdfium.dll" },
    Platform { os: "windows", arch: "aarch64", archive: "pdfium-win-arm64.tgz", member: "bin/pdfium.dll", file_name: "pdfium.dll" },
    Platform { os: "windows", arch: "x86", archive: "pdfium-win-x86.tgz", member: "bin/pdfium.dll", file_name: "pdfium.dll" },
];

fn platform_for(os: &str, arch: &str) -> Result<&'static Platform, PdfiumAutoError> {
    PLATFORMS
        .iter()
        .find(|p| p.os == os && p.arch == arch)
        .ok_or_else(|| PdfiumAutoError::UnsupportedPlatform {
            os: os.to_string(),
            arch: arch.to_string(),
        })
}

/// The platform entry for the running process.
pub fn current_platform() -> Result<&'static Platform, PdfiumAutoError> {
    platform_for(std::env::consts::OS, std::env::consts::ARCH)
}

// ── Options ──────────────────────────────────────────────────────────────────

/// Controls where [`bind`] looks for PDFium.
#[derive(Debug, Clone)]
pub struct BindOptions {
    /// Explicit library file. Tried first; a missing file only logs a warning.
    pub library_path: Option<PathBuf>,
    /// Replaces the user cache root. The version subdirectory is still appended.
    pub cache_dir: Option<PathBuf>,
    /// Fetch the library from GitHub when nothing local loads. Default: true.
    pub allow_download: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            library_path: None,
            cache_dir: None,
            allow_download: true,
        }
    }
}

/// Returns the per-version cache directory.
///
/// Default locations:
/// - **macOS**: `~/Library/Caches/pdftext/pdfium-{VERSION}/`
/// - **Linux**: `~/.cache/pdftext/pdfium-{VERSION}/`
/// - **Windows**: `%LOCALAPPDATA%\pdftext\pdfium-{VERSION}\`
///
/// With `root` set, the directory is `{root}/pdfium-{VERSION}/`.
pub fn cache_dir(root: Option<&Path>) -> PathBuf {
    let version_dir = format!("pdfium-{PDFIUM_VERSION}");
    if let Some(root) = root {
        return root.join(version_dir);
    }

    dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".cache")))
        .unwrap_or_else(std::env::temp_dir)
        .join(CACHE_NAMESPACE)
        .join(version_dir)
}

/// Path of the cached library for this platform, if it has been downloaded.
pub fn cached_library(options: &BindOptions) -> Option<PathBuf> {
    let platform = current_platform().ok()?;
    let path = cache_dir(options.cache_dir.as_deref()).join(platform.file_name);
    path.exists().then_some(path)
}

// ── Binding ──────────────────────────────────────────────────────────────────

/// Bind to PDFium following the resolution order in the crate docs.
pub fn bind(options: &BindOptions) -> Result<Pdfium, PdfiumAutoError> {
    if let Some(explicit) = &options.library_path {
        if explicit.exists() {
            debug!("Binding PDFium from explicit path {}", explicit.display());
            return bind_from_path(explicit);
        }
        warn!(
            "PDFium library '{}' does not exist; falling back to cache",
            explicit.display()
        );
    }

    let platform = current_platform()?;
    let cached = cache_dir(options.cache_dir.as_deref()).join(platform.file_name);
    if cached.exists() {
        debug!("Binding cached PDFium {}", cached.display());
        return bind_from_path(&cached);
    }

    match Pdfium::bind_to_system_library() {
        Ok(bindings) => {
            debug!("Bound system PDFium library");
            return Ok(Pdfium::new(bindings));
        }
        Err(e) => debug!("No system PDFium library: {:?}", e),
    }

    if !options.allow_download {
        return Err(PdfiumAutoError::NotFound { expected: cached });
    }

    download_library(platform, &cached)?;
    bind_from_path(&cached)
}

/// Bind to the library at `path` without touching the cache.
pub fn bind_from_path(path: &Path) -> Result<Pdfium, PdfiumAutoError> {
    Pdfium::bind_to_library(path)
        .map(Pdfium::new)
        .map_err(|e| PdfiumAutoError::Bind {
            path: path.to_path_buf(),
            reason: format!("{:?}", e),
        })
}

// ── Download ─────────────────────────────────────────────────────────────────

fn release_url(platform: &Platform) -> String {
    format!(
        "{BASE_URL}/chromium%2F{PDFIUM_VERSION}/{}",
        platform.archive
    )
}

/// Download the platform archive and unpack the library to `dest`.
fn download_library(platform: &Platform, dest: &Path) -> Result<(), PdfiumAutoError> {
    let url = release_url(platform);
    info!("Downloading PDFium {} from {}", PDFIUM_VERSION, url);

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(PdfiumAutoError::CacheDir)?;
    }

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("pdfium-auto/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| PdfiumAutoError::Download(e.to_string()))?;

    let response = client
        .get(&url)
        .send()
        .map_err(|e| PdfiumAutoError::Download(format!("GET {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(PdfiumAutoError::Download(format!(
            "HTTP {} for {url}",
            response.status()
        )));
    }

    let archive = response
        .bytes()
        .map_err(|e| PdfiumAutoError::Download(format!("Read error: {e}")))?;
    debug!("Downloaded {} bytes", archive.len());

    // Unpack beside the target and rename so a crash never leaves a
    // truncated library where `bind` would pick it up.
    let partial = dest.with_extension("part");
    extract_member(&archive, platform.member, &partial)?;
    std::fs::rename(&partial, dest)
        .map_err(|e| PdfiumAutoError::Extract(format!("Rename failed: {e}")))?;

    info!("PDFium cached at {}", dest.display());
    Ok(())
}

/// Copy one file out of a gzipped tar archive into `dest`.
fn extract_member(archive: &[u8], member: &str, dest: &Path) -> Result<(), PdfiumAutoError> {
    use flate2::read::GzDecoder;
    use tar::Archive;

    let mut archive = Archive::new(GzDecoder::new(archive));
    let entries = archive
        .entries()
        .map_err(|e| PdfiumAutoError::Extract(e.to_string()))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| PdfiumAutoError::Extract(e.to_string()))?;
        let entry_path = entry
            .path()
            .map_err(|e| PdfiumAutoError::Extract(e.to_string()))?
            .into_owned();
        let relative = entry_path.strip_prefix("./").unwrap_or(&entry_path);

        if relative == Path::new(member) {
            entry
                .unpack(dest)
                .map_err(|e| PdfiumAutoError::Extract(format!("Unpack failed: {e}")))?;
            return Ok(());
        }
    }

    Err(PdfiumAutoError::Extract(format!(
        "'{member}' not found in archive"
    )))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
