//! KakaoTalk line grammar.
//!
//! KakaoTalk text exports come in two dialects, and a file uses one of them
//! throughout. The classifier does not pick a dialect up front: every line is
//! tested against both header grammars independently.
//!
//! Supported dialects:
//! - Divider (PC export): a date divider line followed by bracketed headers
//!   ```text
//!   --------------- 2025년 1월 2일 목요일 ---------------
//!   [Alice] [오전 9:05] hello
//!   ```
//! - Dotted (mobile export): every header carries its own date
//!   ```text
//!   2025. 1. 2. 오후 1:05, Bob, hi there
//!   ```
//!
//! Lines that match neither grammar continue the previous message, or are
//! ignored when no message header has been seen yet.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::{Captures, Regex};

// --------------- 2025년 1월 2일 목요일 ---------------
static DIVIDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-+\s*(\d{4})년\s*(\d{1,2})월\s*(\d{1,2})일").unwrap()
});

// [Alice] [오전 9:05] hello
static BRACKET_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(.+?)\]\s*\[(오전|오후)\s*(\d{1,2}):(\d{2})\]\s*(.*)$").unwrap()
});

// 2025. 1. 2. 오후 1:05, Bob, hi there
static DOTTED_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})\.\s*(\d{1,2})\.\s*(\d{1,2})\.\s*(오전|오후)\s*(\d{1,2}):(\d{2})\s*,(.*)$")
        .unwrap()
});

/// Morning/afternoon marker of the 12-hour clock (`오전` / `오후`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    /// 오전 (AM)
    Am,
    /// 오후 (PM)
    Pm,
}

impl Meridiem {
    /// Parses the Korean marker.
    pub fn parse(marker: &str) -> Option<Self> {
        match marker {
            "오전" => Some(Meridiem::Am),
            "오후" => Some(Meridiem::Pm),
            _ => None,
        }
    }

    /// Converts a 12-hour clock hour into a 24-hour clock hour.
    ///
    /// ```rust
    /// use kakaopack::parsing::Meridiem;
    ///
    /// assert_eq!(Meridiem::Am.to_24_hour(12), Some(0));
    /// assert_eq!(Meridiem::Am.to_24_hour(9), Some(9));
    /// assert_eq!(Meridiem::Pm.to_24_hour(12), Some(12));
    /// assert_eq!(Meridiem::Pm.to_24_hour(1), Some(13));
    /// assert_eq!(Meridiem::Pm.to_24_hour(13), None);
    /// ```
    pub fn to_24_hour(self, hour: u32) -> Option<u32> {
        if hour > 12 {
            return None;
        }
        Some(match (self, hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
        })
    }
}

/// Classification of a single export line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLine {
    /// An empty or whitespace-only line.
    Blank,
    /// Noise before the first message header (export banner, save date, ...).
    Ignorable,
    /// A day divider introducing the date of the following headers.
    DayDivider {
        /// The calendar date announced by the divider.
        date: NaiveDate,
    },
    /// A line starting a new message.
    MessageHeader {
        /// Own date of a dotted-dialect header; `None` for the divider dialect.
        date: Option<NaiveDate>,
        /// Time of day on the 24-hour clock.
        time: NaiveTime,
        /// Trimmed, non-empty sender name.
        sender: String,
        /// First line of the message body (may be empty).
        body: String,
    },
    /// A line continuing the body of the current message.
    Continuation {
        /// The trimmed line text.
        text: String,
    },
}

fn number(caps: &Captures<'_>, idx: usize) -> Option<u32> {
    caps.get(idx)?.as_str().parse().ok()
}

fn date_from(caps: &Captures<'_>, year: usize, month: usize, day: usize) -> Option<NaiveDate> {
    let y = i32::try_from(number(caps, year)?).ok()?;
    NaiveDate::from_ymd_opt(y, number(caps, month)?, number(caps, day)?)
}

fn time_from(caps: &Captures<'_>, marker: usize, hour: usize, minute: usize) -> Option<NaiveTime> {
    let meridiem = Meridiem::parse(caps.get(marker)?.as_str())?;
    let hour = meridiem.to_24_hour(number(caps, hour)?)?;
    NaiveTime::from_hms_opt(hour, number(caps, minute)?, 0)
}

fn match_divider(line: &str) -> Option<NaiveDate> {
    let caps = DIVIDER.captures(line)?;
    date_from(&caps, 1, 2, 3)
}

fn match_bracket_header(line: &str) -> Option<ClassifiedLine> {
    let caps = BRACKET_HEADER.captures(line)?;
    let sender = caps.get(1)?.as_str().trim();
    if sender.is_empty() {
        return None;
    }
    Some(ClassifiedLine::MessageHeader {
        date: None,
        time: time_from(&caps, 2, 3, 4)?,
        sender: sender.to_string(),
        body: caps.get(5).map_or("", |m| m.as_str()).trim().to_string(),
    })
}

fn match_dotted_header(line: &str) -> Option<ClassifiedLine> {
    let caps = DOTTED_HEADER.captures(line)?;
    let (sender, body) = caps.get(7)?.as_str().split_once(',')?;
    let sender = sender.trim();
    if sender.is_empty() {
        return None;
    }
    Some(ClassifiedLine::MessageHeader {
        date: Some(date_from(&caps, 1, 2, 3)?),
        time: time_from(&caps, 4, 5, 6)?,
        sender: sender.to_string(),
        body: body.trim().to_string(),
    })
}

/// Classifies one line.
///
/// `seen_header` tells whether a message header was already classified in
/// the current pass; it decides between `Continuation` and `Ignorable` for
/// lines that match no grammar. A line that only partially resembles a
/// header (say, a bracketed name without a valid time) is not a header.
pub fn classify_line(line: &str, seen_header: bool) -> ClassifiedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ClassifiedLine::Blank;
    }

    if let Some(date) = match_divider(trimmed) {
        return ClassifiedLine::DayDivider { date };
    }

    if let Some(header) = match_bracket_header(trimmed).or_else(|| match_dotted_header(trimmed)) {
        return header;
    }

    if seen_header {
        ClassifiedLine::Continuation {
            text: trimmed.to_string(),
        }
    } else {
        ClassifiedLine::Ignorable
    }
}

/// Returns `true` if the line is a day divider or a message header of
/// either dialect.
pub fn is_structural_line(line: &str) -> bool {
    matches!(
        classify_line(line, false),
        ClassifiedLine::DayDivider { .. } | ClassifiedLine::MessageHeader { .. }
    )
}

/// Lazy line classifier.
///
/// Yields exactly one [`ClassifiedLine`] per input line and never looks
/// ahead. The only state it carries is whether a header has been seen.
#[derive(Debug, Clone)]
pub struct Classifier<I> {
    lines: I,
    seen_header: bool,
}

impl<I> Classifier<I> {
    /// Wraps an iterator of lines.
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            seen_header: false,
        }
    }
}

impl<I, S> Iterator for Classifier<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = ClassifiedLine;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        let classified = classify_line(line.as_ref(), self.seen_header);
        if matches!(classified, ClassifiedLine::MessageHeader { .. }) {
            self.seen_header = true;
        }
        Some(classified)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }
}

/// Classifies a sequence of lines lazily.
///
/// # Example
///
/// ```rust
/// use kakaopack::parsing::{ClassifiedLine, classify};
///
/// let lines = ["저장한 날짜 : 2025-01-03", "2025. 1. 2. 오후 1:05, Bob, hi there", "more"];
/// let classified: Vec<_> = classify(lines).collect();
///
/// assert_eq!(classified[0], ClassifiedLine::Ignorable);
/// assert!(matches!(classified[1], ClassifiedLine::MessageHeader { .. }));
/// assert!(matches!(classified[2], ClassifiedLine::Continuation { .. }));
/// ```
pub fn classify<I>(lines: I) -> Classifier<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Classifier::new(lines.into_iter())
}
