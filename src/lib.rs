//! # kakaopack
//!
//! A Rust library for converting KakaoTalk chat exports into a paginated PDF
//! report and an XLSX spreadsheet.
//!
//! ## Overview
//!
//! KakaoTalk's "export chat" feature produces a plain-text file whose shape
//! depends on the client:
//! - **Desktop** exports group messages under day divider lines
//!   (`--------------- 2024년 1월 15일 월요일 ---------------`) and start each
//!   message with `[sender] [오후 9:05] body`
//! - **Mobile** exports start each message with the full date
//!   (`2024. 1. 15. 오후 9:05, sender, body`)
//!
//! The byte encoding is not declared either: older Windows exports are CP949,
//! newer ones UTF-8, sometimes with a byte-order mark. kakaopack picks the
//! plausible encoding, reassembles multi-line messages and renders both
//! artifacts from the same transcript.
//!
//! ## Quick Start
//!
//! ```rust
//! use kakaopack::prelude::*;
//!
//! let export = "2024. 1. 15. 오후 9:05, 홍길동, 안녕하세요\n\
//!               2024. 1. 15. 오후 9:06, 김철수, 반가워요";
//!
//! let conversion = convert(export.as_bytes(), "KakaoTalk_Chat.txt")?;
//! assert_eq!(conversion.transcript.len(), 2);
//! assert_eq!(conversion.document.mime_type(), "application/pdf");
//! assert_eq!(conversion.table.file_name, "KakaoTalk_Chat.xlsx");
//! # Ok::<(), KakaopackError>(())
//! ```
//!
//! ## Step by Step
//!
//! Each stage is usable on its own:
//!
//! ```rust
//! use kakaopack::config::TableConfig;
//! use kakaopack::core::render_table;
//! use kakaopack::encoding::resolve;
//! use kakaopack::parsers::assemble;
//! use kakaopack::parsing::classify;
//! use kakaopack::Transcript;
//!
//! let decoded = resolve("2024. 1. 15. 오후 9:05, 홍길동, 안녕".as_bytes());
//! let (messages, diagnostics) = assemble(classify(&decoded.lines));
//! assert_eq!(diagnostics.header_lines, 1);
//!
//! let transcript = Transcript::new(messages, decoded.encoding);
//! let table = render_table(&transcript, &TableConfig::new())?;
//! assert!(!table.is_empty());
//! # Ok::<(), kakaopack::KakaopackError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`encoding`] - Encoding resolver ([`resolve`](encoding::resolve))
//! - [`parsing`] - Line classifier for both export dialects
//! - [`parsers`] - Transcript assembly ([`KakaoTalkParser`](parsers::KakaoTalkParser))
//! - [`core`] - Renderers ([`render_document`](core::render_document),
//!   [`render_table`](core::render_table)) and statistics
//! - [`config`] - Configuration types
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and artifact naming
//! - [`error`] - Unified error types ([`KakaopackError`], [`Result`])
//! - [`cli`] - CLI arguments (feature `cli`)
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod core;
pub mod encoding;
pub mod error;
pub mod format;
pub mod message;
pub mod parsers;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use convert::{Conversion, convert, convert_with_config};
pub use error::{KakaopackError, Result};
pub use message::{Message, Transcript};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use kakaopack::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::{Message, Transcript};

    // Error types
    pub use crate::error::{KakaopackError, Result};

    // Pipeline
    pub use crate::convert::{Conversion, convert, convert_with_config};

    // Configuration
    pub use crate::config::{ConvertConfig, DocumentConfig, EncodingConfig, ParserConfig, TableConfig};

    // Parsing
    pub use crate::encoding::EncodingId;
    pub use crate::parsers::{KakaoTalkParser, ParseDiagnostics};

    // Rendering
    pub use crate::core::{RenderWarning, RenderedArtifact, TranscriptStats, render_document, render_table};
    pub use crate::format::OutputFormat;
}
