//! Output renderers.
//!
//! This module provides one renderer per artifact:
//! - [`render_document`] - paginated PDF report
//! - [`render_table`] - XLSX spreadsheet, one row per message
//!
//! Both renderers only read the [`Transcript`](crate::Transcript) and can run
//! concurrently. Each returns a [`RenderedArtifact`] holding the encoded bytes.
//!
//! # Example
//!
//! ```rust
//! use kakaopack::config::{DocumentConfig, TableConfig};
//! use kakaopack::core::output::{render_document, render_table};
//! use kakaopack::parsers::KakaoTalkParser;
//!
//! let transcript = KakaoTalkParser::new().parse_str("2025. 1. 2. 오후 1:05, Bob, hi there")?;
//!
//! let table = render_table(&transcript, &TableConfig::new())?;
//! assert!(table.bytes.starts_with(b"PK"));
//!
//! let document = render_document(&transcript, &DocumentConfig::new())?;
//! assert!(document.bytes.starts_with(b"%PDF"));
//! # Ok::<(), kakaopack::KakaopackError>(())
//! ```

mod layout;
mod metrics;
mod pdf_writer;
mod xlsx_writer;

pub use pdf_writer::render_document;
pub use xlsx_writer::render_table;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format::OutputFormat;

/// A condition that degraded an artifact without failing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RenderWarning {
    /// The configured Hangul font could not be loaded; the built-in font was
    /// used and non-ASCII text was replaced.
    MissingFontResource {
        /// The font path that was tried
        path: PathBuf,
        /// Why loading failed
        reason: String,
    },
}

impl std::fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderWarning::MissingFontResource { path, reason } => write!(
                f,
                "font '{}' unavailable ({}), using built-in font",
                path.display(),
                reason
            ),
        }
    }
}

/// An encoded output artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    /// Artifact format
    pub format: OutputFormat,
    /// Suggested file name
    pub file_name: String,
    /// Encoded content
    pub bytes: Vec<u8>,
    /// Degradations that happened while rendering
    pub warnings: Vec<RenderWarning>,
}

impl RenderedArtifact {
    /// Creates an artifact named after the default file stem.
    pub fn new(format: OutputFormat, bytes: Vec<u8>) -> Self {
        Self {
            format,
            file_name: format.file_name_for(""),
            bytes,
            warnings: Vec::new(),
        }
    }

    /// Names the artifact after the original upload's display name.
    #[must_use]
    pub fn with_file_name_for(mut self, display_name: &str) -> Self {
        self.file_name = self.format.file_name_for(display_name);
        self
    }

    /// Attaches a warning.
    #[must_use]
    pub fn with_warning(mut self, warning: RenderWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Returns the MIME type.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Returns the size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the artifact has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` if rendering degraded the artifact.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Writes the artifact into `dir` under its file name and returns the
    /// written path.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}
