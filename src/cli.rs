//! Command-line interface definition using clap.
//!
//! This module defines [`Args`], the argument structure of the `kakaopack`
//! binary, and the mapping from arguments to a [`ConvertConfig`].
//!
//! ```rust
//! use clap::Parser;
//! use kakaopack::cli::Args;
//!
//! let args = Args::parse_from(["kakaopack", "chat.txt", "--title", "회의록"]);
//! let config = args.convert_config();
//! assert_eq!(config.document.title, "회의록");
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConvertConfig, DocumentConfig};
use crate::format::OutputFormat;

/// Convert KakaoTalk chat exports into a PDF report and an XLSX table.
#[derive(Parser, Debug, Clone)]
#[command(name = "kakaopack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    kakaopack KakaoTalk_Chat.txt
    kakaopack chat.txt -o reports/
    kakaopack chat.txt --font ~/fonts/NanumGothic.ttf --title \"팀 대화\"
    kakaopack chat.txt --only xlsx")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Directory the artifacts are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// TrueType font with Hangul glyphs for the PDF report
    /// (default: $KAKAOPACK_FONT, then assets/fonts/NanumGothic.ttf)
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Title printed at the top of the PDF report
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Write only one artifact (pdf or xlsx)
    #[arg(long, value_name = "FORMAT")]
    pub only: Option<OutputFormat>,

    /// Log pipeline details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the conversion configuration from the arguments.
    pub fn convert_config(&self) -> ConvertConfig {
        let mut document = DocumentConfig::new();
        if let Some(font) = &self.font {
            document = document.with_font_path(font);
        }
        if let Some(title) = &self.title {
            document = document.with_title(title.as_str());
        }
        ConvertConfig::new().with_document(document)
    }

    /// Returns `true` if the artifact of `format` should be written.
    pub fn wants(&self, format: OutputFormat) -> bool {
        self.only.is_none_or(|only| only == format)
    }

    /// Returns the display name used to name the artifacts.
    pub fn display_name(&self) -> String {
        self.input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
