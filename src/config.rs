//! Configuration types for decoding, parsing and rendering.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. Every struct has sensible
//! defaults that reproduce the standard KakaoTalk report layout.
//!
//! - [`EncodingConfig`] - candidate encodings for raw bytes
//! - [`ParserConfig`] - transcript assembly settings
//! - [`DocumentConfig`] - PDF report layout and font
//! - [`TableConfig`] - XLSX sheet layout
//! - [`ConvertConfig`] - everything above, for [`convert_with_config`](crate::convert_with_config)
//!
//! # Example
//!
//! ```rust
//! use kakaopack::config::{ConvertConfig, DocumentConfig};
//!
//! let config = ConvertConfig::new().with_document(
//!     DocumentConfig::new()
//!         .with_title("팀 회의 대화")
//!         .with_font_path("/usr/share/fonts/NanumGothic.ttf"),
//! );
//! assert_eq!(config.document.title, "팀 회의 대화");
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::encoding::EncodingId;

/// Environment variable overriding the default font path.
pub const FONT_ENV_VAR: &str = "KAKAOPACK_FONT";

/// Font path used when neither the config nor the environment names one.
pub const DEFAULT_FONT_PATH: &str = "assets/fonts/NanumGothic.ttf";

/// Configuration for the encoding resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Candidate encodings to try. Equal scores go to UTF-8 when it is a
    /// candidate, otherwise to the earlier entry (default: UTF-8, CP949)
    pub candidates: Vec<EncodingId>,

    /// Inputs at least this large decode candidates on separate threads
    /// (default: 256KB)
    pub parallel_threshold: usize,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            candidates: vec![EncodingId::Utf8, EncodingId::Cp949],
            parallel_threshold: 256 * 1024, // 256KB
        }
    }
}

impl EncodingConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the candidate encodings.
    #[must_use]
    pub fn with_candidates(mut self, candidates: Vec<EncodingId>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Sets the size above which candidates are decoded in parallel.
    #[must_use]
    pub fn with_parallel_threshold(mut self, bytes: usize) -> Self {
        self.parallel_threshold = bytes;
        self
    }
}

/// Configuration for transcript assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Decoding settings
    pub encoding: EncodingConfig,

    /// Number of leading non-blank lines kept in failure diagnostics (default: 10)
    pub preview_lines: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            encoding: EncodingConfig::default(),
            preview_lines: 10,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the encoding configuration.
    #[must_use]
    pub fn with_encoding(mut self, encoding: EncodingConfig) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets how many lines the failure preview keeps.
    #[must_use]
    pub fn with_preview_lines(mut self, lines: usize) -> Self {
        self.preview_lines = lines;
        self
    }
}

/// Configuration for the PDF report.
///
/// Sizes are in PDF points (1/72 inch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Title printed at the top of the first page (default: "카카오톡 대화 내역")
    pub title: String,

    /// TrueType font able to render Hangul; `None` uses
    /// `$KAKAOPACK_FONT` or `assets/fonts/NanumGothic.ttf`
    pub font_path: Option<PathBuf>,

    /// Page width (default: A4, 595.28pt)
    pub page_width: f32,

    /// Page height (default: A4, 841.89pt)
    pub page_height: f32,

    /// Margin on every side (default: 40pt)
    pub margin: f32,

    /// Title font size (default: 16pt)
    pub title_size: f32,

    /// Timestamp font size (default: 10pt)
    pub timestamp_size: f32,

    /// Message font size (default: 12pt)
    pub body_size: f32,

    /// Text shown when the transcript is empty
    pub empty_placeholder: String,

    /// Label substituted for an empty sender
    pub unknown_sender: String,

    /// Label substituted for an empty body
    pub empty_body: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: "카카오톡 대화 내역".to_string(),
            font_path: None,
            page_width: 595.28,
            page_height: 841.89,
            margin: 40.0,
            title_size: 16.0,
            timestamp_size: 10.0,
            body_size: 12.0,
            empty_placeholder: "대화 내용이 없습니다.".to_string(),
            unknown_sender: "(알 수 없음)".to_string(),
            empty_body: "(내용 없음)".to_string(),
        }
    }
}

impl DocumentConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the report title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the font file.
    #[must_use]
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    /// Sets the page size in points.
    #[must_use]
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Sets the page margin in points.
    #[must_use]
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Returns the font path to try: the configured one, then the
    /// environment, then the default asset path.
    pub fn resolved_font_path(&self) -> PathBuf {
        self.font_path
            .clone()
            .or_else(|| std::env::var_os(FONT_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FONT_PATH))
    }
}

/// Configuration for the XLSX spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Worksheet name (default: "카카오톡 대화")
    pub sheet_name: String,

    /// Header labels for the date, sender and message columns
    pub headers: [String; 3],

    /// Column widths in character units (default: 20, 15, 50)
    pub column_widths: [f64; 3],
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            sheet_name: "카카오톡 대화".to_string(),
            headers: ["날짜".to_string(), "발신자".to_string(), "메시지".to_string()],
            column_widths: [20.0, 15.0, 50.0],
        }
    }
}

impl TableConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the worksheet name.
    #[must_use]
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Sets the header labels.
    #[must_use]
    pub fn with_headers(mut self, date: &str, sender: &str, message: &str) -> Self {
        self.headers = [date.to_string(), sender.to_string(), message.to_string()];
        self
    }
}

/// Configuration for a full conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Decoding and assembly settings
    pub parser: ParserConfig,

    /// PDF report settings
    pub document: DocumentConfig,

    /// XLSX spreadsheet settings
    pub table: TableConfig,
}

impl ConvertConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parser configuration.
    #[must_use]
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Sets the document configuration.
    #[must_use]
    pub fn with_document(mut self, document: DocumentConfig) -> Self {
        self.document = document;
        self
    }

    /// Sets the table configuration.
    #[must_use]
    pub fn with_table(mut self, table: TableConfig) -> Self {
        self.table = table;
        self
    }
}
