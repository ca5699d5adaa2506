//! Output format types for the kakaopack library.
//!
//! Every conversion produces one artifact per [`OutputFormat`]. This module
//! owns the per-format metadata (extension, MIME type) and the naming rule
//! that turns an uploaded file's display name into artifact file names.
//!
//! # Example
//!
//! ```rust
//! use kakaopack::format::OutputFormat;
//!
//! assert_eq!(OutputFormat::Pdf.file_name_for("Talk_2025.txt"), "Talk_2025.pdf");
//! assert_eq!(OutputFormat::Xlsx.file_name_for("Talk_2025.txt"), "Talk_2025.xlsx");
//! ```


use serde::{Deserialize, Serialize};

/// Stem used when the display name has no usable file stem.
pub const DEFAULT_FILE_STEM: &str = "kakaotalk";

/// Output format of a rendered artifact.
///
/// - [`Pdf`](OutputFormat::Pdf) - paginated report, one block per message
/// - [`Xlsx`](OutputFormat::Xlsx) - spreadsheet, one row per message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// PDF document
    Pdf,

    /// Office Open XML workbook
    Xlsx,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    ///
    /// ```rust
    /// use kakaopack::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Pdf.extension(), "pdf");
    /// assert_eq!(OutputFormat::Xlsx.extension(), "xlsx");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Xlsx => "xlsx",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["pdf", "xlsx", "excel"]
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Derives the artifact file name from the original display name.
    ///
    /// Only the final path component is kept and its extension is replaced.
    /// Names without a usable stem fall back to [`DEFAULT_FILE_STEM`].
    pub fn file_name_for(&self, display_name: &str) -> String {
        format!("{}.{}", file_stem(display_name), self.extension())
    }
}

/// Returns the file stem of a display name, ignoring any directory part.
pub fn file_stem(display_name: &str) -> String {
    // Uploads from Windows clients may carry backslash-separated paths.
    let last = display_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(display_name)
        .trim();

    let stem = match last.rfind('.') {
        Some(0) | None => last,
        Some(idx) => &last[..idx],
    };

    if stem.trim().is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        stem.to_string()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Pdf => write!(f, "PDF"),
            OutputFormat::Xlsx => write!(f, "XLSX"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "xlsx" | "excel" => Ok(OutputFormat::Xlsx),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}
