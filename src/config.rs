//! Configuration for text extraction.
//!
//! [`ExtractionConfig`] carries the document password and the options that
//! decide where the PDFium engine comes from. Build it with
//! [`ExtractionConfig::builder()`] or take [`ExtractionConfig::default()`].

use crate::error::ExtractionError;
use pdfium_auto::BindOptions;
use std::fmt;
use std::path::PathBuf;

/// Configuration for a single extraction.
///
/// # Example
/// ```rust
/// use pdftext::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .password("s3cret")
///     .allow_download(false)
///     .build()
///     .unwrap();
/// assert_eq!(config.password.as_deref(), Some("s3cret"));
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Explicit path to a libpdfium shared library.
    pub pdfium_library: Option<PathBuf>,

    /// Root directory for the downloaded PDFium cache.
    /// If None, the platform user cache directory is used.
    pub pdfium_cache_dir: Option<PathBuf>,

    /// Download PDFium when no local copy is found. Default: true.
    pub allow_download: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            password: None,
            pdfium_library: None,
            pdfium_cache_dir: None,
            allow_download: true,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("pdfium_library", &self.pdfium_library)
            .field("pdfium_cache_dir", &self.pdfium_cache_dir)
            .field("allow_download", &self.allow_download)
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Engine lookup options derived from this config.
    pub fn bind_options(&self) -> BindOptions {
        BindOptions {
            library_path: self.pdfium_library.clone(),
            cache_dir: self.pdfium_cache_dir.clone(),
            allow_download: self.allow_download,
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn pdfium_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library = Some(path.into());
        self
    }

    pub fn pdfium_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.pdfium_cache_dir = Some(dir.into());
        self
    }

    pub fn allow_download(mut self, v: bool) -> Self {
        self.config.allow_download = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractionError> {
        let c = &self.config;
        if let Some(lib) = &c.pdfium_library {
            if !lib.is_file() {
                return Err(ExtractionError::InvalidConfig(format!(
                    "PDFium library '{}' does not exist",
                    lib.display()
                )));
            }
        }
        if c.password.as_deref() == Some("") {
            return Err(ExtractionError::InvalidConfig(
                "Password must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
