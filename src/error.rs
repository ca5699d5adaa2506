//! Unified error types for kakaopack.
//!
//! This module provides a single [`KakaopackError`] enum that covers every
//! failure the conversion pipeline can surface to a caller.
//!
//! # Error Handling Philosophy
//!
//! - **Malformed lines** never raise: the classifier turns them into
//!   continuations or drops them.
//! - **Undecodable bytes** never raise: the encoding resolver always falls
//!   back to lossy UTF-8.
//! - **A missing font** never raises: the document renderer degrades to a
//!   built-in font and attaches a [`RenderWarning`](crate::core::output::RenderWarning).
//! - Only a *global* absence of messages ([`KakaopackError::NoMessagesParsed`])
//!   or a failing output primitive ([`KakaopackError::Render`]) reaches the caller.

use std::io;

use thiserror::Error;

use crate::format::OutputFormat;
use crate::parsers::ParseDiagnostics;

/// A specialized [`Result`] type for kakaopack operations.
///
/// # Example
///
/// ```rust
/// use kakaopack::error::Result;
/// use kakaopack::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, KakaopackError>;

/// The error type for all kakaopack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KakaopackError {
    /// An I/O error occurred.
    ///
    /// Only file-based helpers (reading an export from disk, writing
    /// artifacts to a directory) produce this variant.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input decoded, but no KakaoTalk message could be recognized.
    ///
    /// This is a user-actionable failure: most often the file is not a
    /// KakaoTalk text export. The diagnostics describe what was seen.
    #[error(
        "No messages could be parsed ({} non-blank lines, {} date dividers, {} message headers). \
         Make sure the file is a KakaoTalk chat export.",
        .0.non_blank_lines,
        .0.divider_lines,
        .0.header_lines
    )]
    NoMessagesParsed(ParseDiagnostics),

    /// An output primitive failed while producing an artifact.
    #[error("Failed to render {format} output: {source}")]
    Render {
        /// The artifact that could not be produced
        format: OutputFormat,
        /// The underlying renderer error
        #[source]
        source: RenderErrorKind,
    },
}

/// Kinds of renderer failures.
#[derive(Debug, Error)]
pub enum RenderErrorKind {
    /// The PDF engine reported an error
    #[error("{0}")]
    Pdf(String),
    /// The spreadsheet writer reported an error
    #[error("{0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    /// The renderer thread panicked
    #[error("renderer panicked: {0}")]
    Panicked(String),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl KakaopackError {
    /// Creates a PDF render error from any displayable engine error.
    pub fn pdf(err: impl std::fmt::Display) -> Self {
        KakaopackError::Render {
            format: OutputFormat::Pdf,
            source: RenderErrorKind::Pdf(err.to_string()),
        }
    }

    /// Creates an XLSX render error.
    pub fn xlsx(err: rust_xlsxwriter::XlsxError) -> Self {
        KakaopackError::Render {
            format: OutputFormat::Xlsx,
            source: RenderErrorKind::Xlsx(err),
        }
    }

    /// Creates an error for a renderer whose thread panicked.
    pub fn render_panicked(format: OutputFormat, message: impl Into<String>) -> Self {
        KakaopackError::Render {
            format,
            source: RenderErrorKind::Panicked(message.into()),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, KakaopackError::Io(_))
    }

    /// Returns `true` if no messages were recognized in the input.
    pub fn is_no_messages(&self) -> bool {
        matches!(self, KakaopackError::NoMessagesParsed(_))
    }

    /// Returns `true` if an output primitive failed.
    pub fn is_render(&self) -> bool {
        matches!(self, KakaopackError::Render { .. })
    }

    /// Returns `true` if the failure is caused by the input rather than by
    /// the system, so the caller can ask the user for a different file.
    pub fn is_user_error(&self) -> bool {
        self.is_no_messages()
    }

    /// Returns the parse diagnostics for a [`NoMessagesParsed`](Self::NoMessagesParsed) failure.
    pub fn diagnostics(&self) -> Option<&ParseDiagnostics> {
        match self {
            KakaopackError::NoMessagesParsed(diagnostics) => Some(diagnostics),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
