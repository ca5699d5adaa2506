//! Transcript parsers.
//!
//! - [`KakaoTalkParser`] - decodes, classifies and assembles a KakaoTalk
//!   text export into a [`Transcript`](crate::Transcript)
//! - [`TranscriptAssembler`] - the state machine turning classified lines
//!   into messages, usable on its own with [`crate::parsing::classify`]
//!
//! # Example
//!
//! ```rust
//! use kakaopack::parsers::KakaoTalkParser;
//!
//! let parser = KakaoTalkParser::new();
//! let transcript = parser.parse_str("2025. 1. 2. 오후 1:05, Bob, hi there")?;
//! assert_eq!(transcript.len(), 1);
//! # Ok::<(), kakaopack::KakaopackError>(())
//! ```

mod kakaotalk;

pub use kakaotalk::{KakaoTalkParser, ParseDiagnostics, TranscriptAssembler, assemble};
