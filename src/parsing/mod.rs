//! Shared parsing utilities.
//!
//! This module contains the line grammar of KakaoTalk text exports. It is
//! used by the transcript assembler in [`crate::parsers`] and by the encoding
//! resolver in [`crate::encoding`], which scores candidate decodings by how
//! many lines the grammar recognizes.

pub mod kakaotalk;

// Re-export commonly used items
pub use kakaotalk::{
    ClassifiedLine, Classifier, Meridiem, classify, classify_line, is_structural_line,
};
