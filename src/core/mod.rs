//! Transcript processing and rendering.
//!
//! This module contains:
//! - [`processor`] - Transcript statistics
//! - [`output`] - Artifact renderers (PDF, XLSX)
//!
//! # Quick Start
//!
//! ```rust
//! use kakaopack::core::{TranscriptStats, render_table};
//! use kakaopack::config::TableConfig;
//! use kakaopack::parsers::KakaoTalkParser;
//!
//! let transcript = KakaoTalkParser::new().parse_str("2025. 1. 2. 오후 1:05, Bob, hi")?;
//! let stats = TranscriptStats::from_transcript(&transcript);
//! assert_eq!(stats.message_count, 1);
//!
//! let table = render_table(&transcript, &TableConfig::new())?;
//! assert_eq!(table.file_name, "kakaotalk.xlsx");
//! # Ok::<(), kakaopack::KakaopackError>(())
//! ```

pub mod output;
pub mod processor;

pub use output::{RenderWarning, RenderedArtifact, render_document, render_table};
pub use processor::TranscriptStats;
