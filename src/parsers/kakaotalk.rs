//! KakaoTalk TXT export parser.
//!
//! Parsing runs in three strictly sequential steps:
//!
//! 1. [`resolve`](crate::encoding::resolve_with_config) picks the encoding and splits lines
//! 2. [`classify`] tags every line (divider, header, continuation, noise)
//! 3. [`TranscriptAssembler`] folds the tagged lines into messages
//!
//! Malformed lines never fail the parse. Only an input that has content but
//! yields no message at all is reported, as
//! [`KakaopackError::NoMessagesParsed`].

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Message;
use crate::config::ParserConfig;
use crate::encoding::{DecodedText, EncodingId, resolve_with_config};
use crate::error::{KakaopackError, Result};
use crate::message::Transcript;
use crate::parsing::{ClassifiedLine, classify};

/// Maximum characters of a line kept in the diagnostics preview.
const PREVIEW_LINE_CHARS: usize = 50;

/// Counts collected while assembling a transcript.
///
/// Attached to [`KakaopackError::NoMessagesParsed`] so that callers can tell
/// the user what the file looked like.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseDiagnostics {
    /// Encoding the input was decoded with
    pub encoding: EncodingId,
    /// `true` if malformed bytes were replaced while decoding
    pub lossy: bool,
    /// Lines that were not blank
    pub non_blank_lines: usize,
    /// Day divider lines recognized
    pub divider_lines: usize,
    /// Message header lines recognized, of either dialect
    pub header_lines: usize,
    /// Headers ignored because no day divider preceded them
    pub orphan_headers: usize,
    /// Continuation lines appended to a message
    pub continuation_lines: usize,
    /// Continuation lines dropped because no message was open
    pub dropped_lines: usize,
    /// Noise lines before the first header
    pub ignored_lines: usize,
    /// Messages produced
    pub messages: usize,
    /// The first non-blank lines of the input, truncated
    pub preview: Vec<String>,
}

/// Assembly state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No day divider seen yet and no message open.
    NoDate,
    /// A day divider is held, no message open.
    HasDate(NaiveDate),
    /// The last message accepts continuations.
    InMessage { held: Option<NaiveDate> },
}

impl State {
    fn held_date(self) -> Option<NaiveDate> {
        match self {
            State::NoDate => None,
            State::HasDate(date) => Some(date),
            State::InMessage { held } => held,
        }
    }

    fn closed(self) -> Self {
        match self.held_date() {
            Some(date) => State::HasDate(date),
            None => State::NoDate,
        }
    }
}

/// Folds classified lines into messages.
///
/// A message is opened by a header, grows with every continuation line, and
/// is closed by the next header, the next day divider, or the end of input.
///
/// # Example
///
/// ```rust
/// use kakaopack::parsers::TranscriptAssembler;
/// use kakaopack::parsing::classify;
///
/// let lines = [
///     "--------------- 2025년 1월 2일 목요일 ---------------",
///     "[Alice] [오전 9:05] hello",
///     "world",
/// ];
/// let mut assembler = TranscriptAssembler::new();
/// for line in classify(lines) {
///     assembler.push(line);
/// }
/// let (messages, diagnostics) = assembler.finish();
///
/// assert_eq!(messages[0].body, "hello\nworld");
/// assert_eq!(diagnostics.divider_lines, 1);
/// ```
#[derive(Debug, Clone)]
pub struct TranscriptAssembler {
    state: State,
    messages: Vec<Message>,
    diagnostics: ParseDiagnostics,
}

impl Default for TranscriptAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptAssembler {
    /// Creates an assembler in the initial state.
    pub fn new() -> Self {
        Self {
            state: State::NoDate,
            messages: Vec::new(),
            diagnostics: ParseDiagnostics::default(),
        }
    }

    /// Feeds one classified line.
    pub fn push(&mut self, line: ClassifiedLine) {
        if !matches!(line, ClassifiedLine::Blank) {
            self.diagnostics.non_blank_lines += 1;
        }

        match line {
            ClassifiedLine::Blank => {}
            ClassifiedLine::Ignorable => self.diagnostics.ignored_lines += 1,
            ClassifiedLine::DayDivider { date } => {
                self.diagnostics.divider_lines += 1;
                self.state = State::HasDate(date);
            }
            ClassifiedLine::MessageHeader {
                date,
                time,
                sender,
                body,
            } => {
                self.diagnostics.header_lines += 1;
                let held = self.state.held_date();
                match date.or(held) {
                    Some(day) => {
                        self.messages.push(Message::new(day.and_time(time), sender, body));
                        self.state = State::InMessage { held };
                    }
                    None => {
                        self.diagnostics.orphan_headers += 1;
                        self.state = self.state.closed();
                    }
                }
            }
            ClassifiedLine::Continuation { text } => match (self.state, self.messages.last_mut()) {
                (State::InMessage { .. }, Some(last)) => {
                    last.push_line(&text);
                    self.diagnostics.continuation_lines += 1;
                }
                _ => self.diagnostics.dropped_lines += 1,
            },
        }
    }

    /// Finalizes the open message and returns the messages with the
    /// collected diagnostics.
    pub fn finish(mut self) -> (Vec<Message>, ParseDiagnostics) {
        self.diagnostics.messages = self.messages.len();
        (self.messages, self.diagnostics)
    }
}

/// Assembles messages from a stream of classified lines.
pub fn assemble<I>(lines: I) -> (Vec<Message>, ParseDiagnostics)
where
    I: IntoIterator<Item = ClassifiedLine>,
{
    let mut assembler = TranscriptAssembler::new();
    for line in lines {
        assembler.push(line);
    }
    assembler.finish()
}

/// Parser for KakaoTalk TXT exports.
///
/// Both the PC export (day dividers and bracketed headers) and the mobile
/// export (dotted dates on every header) are recognized, in CP949 or UTF-8.
///
/// # Example
///
/// ```rust,no_run
/// use kakaopack::parsers::KakaoTalkParser;
///
/// let parser = KakaoTalkParser::new();
/// let transcript = parser.parse("KakaoTalk_20250102.txt".as_ref())?;
/// for msg in &transcript {
///     println!("{} {}: {}", msg.timestamp_string(), msg.sender, msg.body);
/// }
/// # Ok::<(), kakaopack::KakaopackError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct KakaoTalkParser {
    config: ParserConfig,
}

impl KakaoTalkParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the name of the parser.
    pub fn name(&self) -> &'static str {
        "KakaoTalk"
    }

    /// Reads and parses an export file.
    pub fn parse(&self, path: &Path) -> Result<Transcript> {
        let bytes = fs::read(path)?;
        self.parse_bytes(&bytes)
    }

    /// Parses raw export bytes of unknown encoding.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Transcript> {
        let decoded = resolve_with_config(bytes, &self.config.encoding);
        debug!(
            bytes = bytes.len(),
            lines = decoded.lines.len(),
            encoding = %decoded.encoding,
            lossy = decoded.lossy,
            "decoded export"
        );
        self.parse_decoded(&decoded)
    }

    /// Parses already decoded text.
    pub fn parse_str(&self, content: &str) -> Result<Transcript> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let decoded = DecodedText {
            lines: content.lines().map(str::to_string).collect(),
            encoding: EncodingId::Utf8,
            lossy: false,
        };
        self.parse_decoded(&decoded)
    }

    /// Classifies and assembles decoded lines.
    pub fn parse_decoded(&self, decoded: &DecodedText) -> Result<Transcript> {
        let (messages, mut diagnostics) = assemble(classify(&decoded.lines));
        diagnostics.encoding = decoded.encoding;
        diagnostics.lossy = decoded.lossy;

        debug!(
            non_blank = diagnostics.non_blank_lines,
            dividers = diagnostics.divider_lines,
            headers = diagnostics.header_lines,
            orphans = diagnostics.orphan_headers,
            messages = diagnostics.messages,
            "assembled transcript"
        );

        if messages.is_empty() && diagnostics.non_blank_lines > 0 {
            diagnostics.preview = preview(&decoded.lines, self.config.preview_lines);
            return Err(KakaopackError::NoMessagesParsed(diagnostics));
        }

        Ok(Transcript::new(messages, decoded.encoding))
    }
}

fn preview(lines: &[String], limit: usize) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .take(limit)
        .map(|line| line.chars().take(PREVIEW_LINE_CHARS).collect())
        .collect()
}
