//! Character encoding resolution for raw export bytes.
//!
//! KakaoTalk has shipped text exports both as CP949 (the Korean Windows code
//! page) and as UTF-8, and uploaded files carry no charset information. The
//! resolver decodes the bytes under every candidate encoding and keeps the
//! decoding that looks most like a KakaoTalk export:
//!
//! 1. A byte-order mark decides immediately.
//! 2. Error-free decodings beat decodings that needed replacement characters.
//! 3. Higher plausibility score wins (structural lines, then Hangul syllables).
//! 4. Ties go to the earlier candidate, so UTF-8 wins by default.
//!
//! Resolution never fails: when nothing decodes cleanly and nothing looks
//! like an export, the bytes are decoded as UTF-8 with replacement.
//!
//! # Example
//!
//! ```rust
//! use kakaopack::encoding::{EncodingId, resolve};
//!
//! let decoded = resolve("[Alice] [오전 9:05] hello".as_bytes());
//! assert_eq!(decoded.encoding, EncodingId::Utf8);
//! assert_eq!(decoded.lines, vec!["[Alice] [오전 9:05] hello"]);
//! ```

use std::borrow::Cow;

use encoding_rs::{EUC_KR, Encoding, UTF_8, UTF_16BE, UTF_16LE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EncodingConfig;
use crate::parsing::is_structural_line;

/// Weight of one structural line relative to one Hangul syllable.
const STRUCTURAL_LINE_WEIGHT: u64 = 100;

/// Identifier of an encoding the resolver can choose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingId {
    /// UTF-8
    #[default]
    Utf8,
    /// CP949 / Windows-949 (a superset of EUC-KR)
    Cp949,
    /// UTF-16 little endian (only selected through a byte-order mark)
    Utf16Le,
    /// UTF-16 big endian (only selected through a byte-order mark)
    Utf16Be,
}

impl EncodingId {
    fn encoding(self) -> &'static Encoding {
        match self {
            EncodingId::Utf8 => UTF_8,
            // encoding_rs implements the WHATWG EUC-KR decoder, which is CP949.
            EncodingId::Cp949 => EUC_KR,
            EncodingId::Utf16Le => UTF_16LE,
            EncodingId::Utf16Be => UTF_16BE,
        }
    }

    fn from_encoding(encoding: &'static Encoding) -> Self {
        if encoding == UTF_16LE {
            EncodingId::Utf16Le
        } else if encoding == UTF_16BE {
            EncodingId::Utf16Be
        } else if encoding == EUC_KR {
            EncodingId::Cp949
        } else {
            EncodingId::Utf8
        }
    }

    /// Returns the canonical label of this encoding.
    pub fn label(self) -> &'static str {
        match self {
            EncodingId::Utf8 => "UTF-8",
            EncodingId::Cp949 => "CP949",
            EncodingId::Utf16Le => "UTF-16LE",
            EncodingId::Utf16Be => "UTF-16BE",
        }
    }

    /// Decodes `bytes` with replacement of malformed sequences.
    ///
    /// Returns the text and whether any replacement happened.
    pub fn decode_lossy(self, bytes: &[u8]) -> (Cow<'_, str>, bool) {
        self.encoding().decode_without_bom_handling(bytes)
    }
}

impl std::fmt::Display for EncodingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Decoded export text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// The text split into lines, without line terminators.
    pub lines: Vec<String>,
    /// The encoding the text was decoded with.
    pub encoding: EncodingId,
    /// `true` if malformed byte sequences were replaced with U+FFFD.
    pub lossy: bool,
}

impl DecodedText {
    fn from_text(text: &str, encoding: EncodingId, lossy: bool) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            lines: text.lines().map(str::to_string).collect(),
            encoding,
            lossy,
        }
    }

    /// Returns an empty decoding.
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            encoding: EncodingId::Utf8,
            lossy: false,
        }
    }

    /// Returns `true` if there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One scored candidate decoding.
#[derive(Debug)]
struct Candidate<'a> {
    encoding: EncodingId,
    text: Cow<'a, str>,
    had_errors: bool,
    score: u64,
}

impl<'a> Candidate<'a> {
    fn decode(encoding: EncodingId, bytes: &'a [u8]) -> Self {
        let (text, had_errors) = encoding.decode_lossy(bytes);
        let score = plausibility_score(&text);
        Self {
            encoding,
            text,
            had_errors,
            score,
        }
    }
}

/// Scores how much `text` looks like a KakaoTalk export.
///
/// Only structural signals are used: lines matching a divider or header
/// grammar, and the number of precomposed Hangul syllables.
pub fn plausibility_score(text: &str) -> u64 {
    let structural = text.lines().filter(|line| is_structural_line(line)).count() as u64;
    let hangul = text.chars().filter(|c| is_hangul_syllable(*c)).count() as u64;
    structural * STRUCTURAL_LINE_WEIGHT + hangul
}

fn is_hangul_syllable(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7A3}')
}

/// Resolves the encoding of `bytes` with the default configuration.
pub fn resolve(bytes: &[u8]) -> DecodedText {
    resolve_with_config(bytes, &EncodingConfig::default())
}

/// Resolves the encoding of `bytes`.
pub fn resolve_with_config(bytes: &[u8], config: &EncodingConfig) -> DecodedText {
    if bytes.is_empty() {
        return DecodedText::empty();
    }

    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let id = EncodingId::from_encoding(encoding);
        let (text, had_errors) = id.decode_lossy(&bytes[bom_len..]);
        debug!(encoding = %id, "encoding selected by byte-order mark");
        return DecodedText::from_text(&text, id, had_errors);
    }

    let candidates: Vec<EncodingId> = if config.candidates.is_empty() {
        vec![EncodingId::Utf8]
    } else {
        config.candidates.clone()
    };

    let decoded = if bytes.len() >= config.parallel_threshold && candidates.len() > 1 {
        decode_parallel(&candidates, bytes)
    } else {
        candidates
            .iter()
            .map(|&encoding| Candidate::decode(encoding, bytes))
            .collect()
    };

    select(decoded, bytes)
}

fn decode_parallel<'a>(candidates: &[EncodingId], bytes: &'a [u8]) -> Vec<Candidate<'a>> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = candidates
            .iter()
            .map(|&encoding| scope.spawn(move || Candidate::decode(encoding, bytes)))
            .collect();

        handles
            .into_iter()
            .zip(candidates)
            .map(|(handle, &encoding)| {
                // A panicking decoder is treated like a failed decode.
                handle.join().unwrap_or_else(|_| Candidate {
                    encoding,
                    text: Cow::Borrowed(""),
                    had_errors: true,
                    score: 0,
                })
            })
            .collect()
    })
}

fn tie_key(candidate: &Candidate<'_>) -> (u64, bool) {
    (candidate.score, candidate.encoding == EncodingId::Utf8)
}

fn select(candidates: Vec<Candidate<'_>>, bytes: &[u8]) -> DecodedText {
    for candidate in &candidates {
        debug!(
            encoding = %candidate.encoding,
            score = candidate.score,
            had_errors = candidate.had_errors,
            "scored encoding candidate"
        );
    }

    // Equal scores go to UTF-8, then to the earliest candidate. `max_by_key`
    // keeps the last maximum, hence the reverse.
    let best_clean = candidates
        .iter()
        .rev()
        .filter(|c| !c.had_errors)
        .max_by_key(|c| tie_key(c));

    if let Some(best) = best_clean {
        let tied = candidates
            .iter()
            .filter(|c| !c.had_errors && c.score == best.score)
            .count();
        if tied > 1 {
            debug!(encoding = %best.encoding, score = best.score, "encoding ambiguous, preferring UTF-8");
        }
        return DecodedText::from_text(&best.text, best.encoding, false);
    }

    let best_lossy = candidates
        .iter()
        .rev()
        .filter(|c| c.score > 0)
        .max_by_key(|c| tie_key(c));

    if let Some(best) = best_lossy {
        warn!(encoding = %best.encoding, "no encoding decoded cleanly, using best lossy decoding");
        return DecodedText::from_text(&best.text, best.encoding, true);
    }

    warn!("no encoding candidate matched, falling back to lossy UTF-8");
    let (text, had_errors) = EncodingId::Utf8.decode_lossy(bytes);
    DecodedText::from_text(&text, EncodingId::Utf8, had_errors)
}
