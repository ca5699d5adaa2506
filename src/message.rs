//! Message records and the assembled transcript.
//!
//! A [`Message`] is the canonical unit of output: one speaker-attributed,
//! timestamped entry of a KakaoTalk conversation. A [`Transcript`] is the
//! ordered sequence of messages assembled from one export file.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use kakaopack::Message;
//!
//! let ts = NaiveDate::from_ymd_opt(2025, 1, 2)
//!     .unwrap()
//!     .and_hms_opt(9, 5, 0)
//!     .unwrap();
//! let msg = Message::new(ts, "Alice", "hello");
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.timestamp_string(), "2025-01-02 09:05");
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::encoding::EncodingId;

/// Display format for message timestamps in every rendered artifact.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A single message from a KakaoTalk export.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | Calendar date and minute, no timezone |
/// | `sender` | `String` | Trimmed display name of the author |
/// | `body` | `String` | Message text, continuation lines joined by `\n` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent, at minute precision.
    pub timestamp: NaiveDateTime,

    /// Display name of the message author.
    pub sender: String,

    /// Text content of the message.
    ///
    /// Multi-line messages keep one line per `\n`-separated segment, in the
    /// order they appeared in the export.
    pub body: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(timestamp: NaiveDateTime, sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the timestamp formatted as `YYYY-MM-DD HH:MM`.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Appends a continuation line to the body. A header without text
    /// takes its first continuation as the body.
    pub(crate) fn push_line(&mut self, line: &str) {
        if !self.body.is_empty() {
            self.body.push('\n');
        }
        self.body.push_str(line);
    }

    /// Returns `true` if this message's body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// The ordered sequence of messages assembled from one export.
///
/// Messages keep their arrival order from the source file; nothing re-sorts,
/// filters or deduplicates them. A transcript is read-only once assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
    encoding: EncodingId,
}

impl Transcript {
    /// Creates a transcript from already assembled messages.
    pub fn new(messages: Vec<Message>, encoding: EncodingId) -> Self {
        Self { messages, encoding }
    }

    /// Creates an empty transcript.
    pub fn empty(encoding: EncodingId) -> Self {
        Self::new(Vec::new(), encoding)
    }

    /// Returns the messages in arrival order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the encoding the source bytes were decoded with.
    pub fn encoding(&self) -> EncodingId {
        self.encoding
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the transcript has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates over the messages in arrival order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Consumes the transcript, returning the messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
