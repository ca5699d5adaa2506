//! Flow layout for the PDF report.
//!
//! Places text lines top to bottom, wraps them to the content width and
//! starts a new page when the cursor reaches the bottom margin. Coordinates
//! are PDF points with the origin at the bottom-left corner of the page.

use super::metrics::FontMetrics;
use crate::config::DocumentConfig;
use crate::message::Transcript;

/// Line height as a multiple of the font size.
const LINE_SPACING: f32 = 1.3;

/// Gap after each message, as a multiple of the body font size.
const MESSAGE_GAP: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shade {
    Black,
    Gray,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlacedText {
    pub text: String,
    pub size: f32,
    pub shade: Shade,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PageLayout {
    pub lines: Vec<PlacedText>,
}

/// Splits `text` into pieces no wider than `max_width` under `metrics`,
/// preferring to break after a space. Always returns at least one piece.
/// A single glyph wider than `max_width` gets a piece of its own.
pub(crate) fn wrap(text: &str, metrics: &FontMetrics<'_>, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;
    // byte offset just past the last space in `current`
    let mut last_space: Option<usize> = None;

    for c in text.chars() {
        let advance = metrics.advance(c, size);
        if c == ' ' && current_width + advance > max_width && !current.is_empty() {
            // the overflowing space becomes the line break
            pieces.push(current.trim_end().to_string());
            current.clear();
            current_width = 0.0;
            last_space = None;
            continue;
        }
        while current_width + advance > max_width && !current.is_empty() {
            match last_space.take() {
                Some(split) if split < current.len() => {
                    let rest = current.split_off(split);
                    pieces.push(current.trim_end().to_string());
                    current = rest;
                }
                _ => {
                    pieces.push(current.trim_end().to_string());
                    current.clear();
                }
            }
            current_width = metrics.text_width(&current, size);
        }
        current.push(c);
        current_width += advance;
        if c == ' ' {
            last_space = Some(current.len());
        }
    }

    if !current.is_empty() || pieces.is_empty() {
        pieces.push(current);
    }
    pieces
}

struct Flow<'a> {
    config: &'a DocumentConfig,
    metrics: &'a FontMetrics<'a>,
    pages: Vec<PageLayout>,
    // distance from the top edge of the current page
    cursor: f32,
}

impl<'a> Flow<'a> {
    fn new(config: &'a DocumentConfig, metrics: &'a FontMetrics<'a>) -> Self {
        Self {
            config,
            metrics,
            pages: vec![PageLayout::default()],
            cursor: config.margin,
        }
    }

    fn content_width(&self) -> f32 {
        (self.config.page_width - 2.0 * self.config.margin).max(1.0)
    }

    fn bottom(&self) -> f32 {
        self.config.page_height - self.config.margin
    }

    fn place(&mut self, text: String, size: f32, shade: Shade, x: f32) {
        let height = size * LINE_SPACING;
        let page_has_text = self.pages.last().is_some_and(|p| !p.lines.is_empty());
        if self.cursor + height > self.bottom() && page_has_text {
            self.pages.push(PageLayout::default());
            self.cursor = self.config.margin;
        }
        self.cursor += height;
        let y = self.config.page_height - self.cursor;
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(PlacedText {
                text,
                size,
                shade,
                x,
                y,
            });
        }
    }

    fn paragraph(&mut self, text: &str, size: f32, shade: Shade) {
        let width = self.content_width();
        let x = self.config.margin;
        for piece in wrap(text, self.metrics, size, width) {
            self.place(piece, size, shade, x);
        }
    }

    fn centered(&mut self, text: &str, size: f32) {
        let width = self.content_width();
        for piece in wrap(text, self.metrics, size, width) {
            let offset = ((width - self.metrics.text_width(&piece, size)) / 2.0).max(0.0);
            let x = self.config.margin + offset;
            self.place(piece, size, Shade::Black, x);
        }
    }

    fn gap(&mut self, height: f32) {
        self.cursor += height;
    }
}

/// Lays out the whole report, measuring text with `metrics`. The first page
/// always exists.
pub(crate) fn layout_document(
    transcript: &Transcript,
    config: &DocumentConfig,
    metrics: &FontMetrics<'_>,
) -> Vec<PageLayout> {
    let mut flow = Flow::new(config, metrics);

    flow.centered(&config.title, config.title_size);
    flow.gap(config.title_size);

    if transcript.is_empty() {
        flow.paragraph(&config.empty_placeholder, config.body_size, Shade::Black);
        return flow.pages;
    }

    for message in transcript {
        flow.paragraph(&message.timestamp_string(), config.timestamp_size, Shade::Gray);

        let sender = if message.sender.trim().is_empty() {
            config.unknown_sender.as_str()
        } else {
            message.sender.as_str()
        };
        let body = if message.body.trim().is_empty() {
            config.empty_body.as_str()
        } else {
            message.body.as_str()
        };

        for (index, line) in body.split('\n').enumerate() {
            if index == 0 {
                flow.paragraph(&format!("{sender}: {line}"), config.body_size, Shade::Black);
            } else {
                flow.paragraph(line, config.body_size, Shade::Black);
            }
        }
        flow.gap(config.body_size * MESSAGE_GAP);
    }

    flow.pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use chrono::NaiveDate;

    const HELVETICA: FontMetrics<'static> = FontMetrics::Helvetica;

    fn message(minute: u32, sender: &str, body: &str) -> Message {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, minute % 60, 0)
            .unwrap();
        Message::new(ts, sender, body)
    }

    fn all_text(pages: &[PageLayout]) -> Vec<String> {
        pages
            .iter()
            .flat_map(|p| p.lines.iter().map(|l| l.text.clone()))
            .collect()
    }

    fn content_width(config: &DocumentConfig) -> f32 {
        config.page_width - 2.0 * config.margin
    }

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap("hello", &HELVETICA, 10.0, 500.0), vec!["hello"]);
        assert_eq!(wrap("", &HELVETICA, 10.0, 500.0), vec![""]);
    }

    #[test]
    fn test_wrap_prefers_spaces() {
        // "aaaa bbbb" is 4 * 5.56 * 2 + 2.78 = 47.26pt at size 10
        let pieces = wrap("aaaa bbbb cccc", &HELVETICA, 10.0, 50.0);
        assert_eq!(pieces, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        let pieces = wrap(&"a".repeat(30), &HELVETICA, 10.0, 50.0);
        assert_eq!(pieces.concat(), "a".repeat(30));
        assert!(pieces.len() >= 4);
        assert!(pieces.iter().all(|p| HELVETICA.text_width(p, 10.0) <= 50.0));
    }

    #[test]
    fn test_wide_glyphs_fit_content_width() {
        let config = DocumentConfig::default();
        let width = content_width(&config);
        let pieces = wrap(&"W".repeat(200), &HELVETICA, config.body_size, width);

        assert!(pieces.len() > 1);
        for piece in &pieces {
            let used = HELVETICA.text_width(piece, config.body_size);
            assert!(used <= width, "{used} > {width}");
        }
        assert_eq!(pieces.concat(), "W".repeat(200));
    }

    #[test]
    fn test_narrow_glyphs_use_the_full_line() {
        let config = DocumentConfig::default();
        let width = content_width(&config);
        let pieces = wrap(&"i".repeat(400), &HELVETICA, config.body_size, width);
        // 'i' is 222/1000 em, so a line holds far more than a column estimate would allow
        assert!(pieces[0].len() > 150);
    }

    #[test]
    fn test_glyph_wider_than_line_stands_alone() {
        let pieces = wrap("aWa", &HELVETICA, 100.0, 60.0);
        assert_eq!(pieces, vec!["a", "W", "a"]);
    }

    #[test]
    fn test_empty_transcript_placeholder() {
        let config = DocumentConfig::default();
        let pages = layout_document(&Transcript::empty(Default::default()), &config, &HELVETICA);
        assert_eq!(pages.len(), 1);
        assert_eq!(all_text(&pages), vec![config.title.clone(), config.empty_placeholder.clone()]);
    }

    #[test]
    fn test_message_lines() {
        let config = DocumentConfig::default();
        let transcript = Transcript::new(
            vec![message(5, "Alice", "first\nsecond"), message(6, "", "")],
            Default::default(),
        );
        let pages = layout_document(&transcript, &config, &HELVETICA);
        let text = all_text(&pages);
        assert_eq!(
            text,
            vec![
                config.title.clone(),
                "2024-01-15 09:05".to_string(),
                "Alice: first".to_string(),
                "second".to_string(),
                "2024-01-15 09:06".to_string(),
                format!("{}: {}", config.unknown_sender, config.empty_body),
            ]
        );
        let stamp = &pages[0].lines[1];
        assert_eq!(stamp.shade, Shade::Gray);
        assert!((stamp.size - config.timestamp_size).abs() < f32::EPSILON);
    }

    #[test]
    fn test_title_is_centered() {
        let config = DocumentConfig::default().with_title("Weekly chat");
        let pages = layout_document(&Transcript::empty(Default::default()), &config, &HELVETICA);
        let title = &pages[0].lines[0];
        let width = HELVETICA.text_width(&title.text, title.size);
        let left = title.x - config.margin;
        let right = config.page_width - config.margin - (title.x + width);
        assert!((left - right).abs() < 0.01);
    }

    #[test]
    fn test_paginates_within_margins() {
        let config = DocumentConfig::default();
        let messages: Vec<Message> = (0..200).map(|i| message(i, "Bob", "hello")).collect();
        let transcript = Transcript::new(messages, Default::default());
        let pages = layout_document(&transcript, &config, &HELVETICA);

        assert!(pages.len() > 1);
        for page in &pages {
            assert!(!page.lines.is_empty());
            for line in &page.lines {
                assert!(line.y >= config.margin - 0.01);
                assert!(line.y <= config.page_height - config.margin);
            }
        }
        // message order survives pagination
        let stamps: Vec<String> = all_text(&pages)
            .into_iter()
            .filter(|t| t.starts_with("2024-"))
            .collect();
        assert_eq!(stamps.len(), 200);
        assert_eq!(stamps[0], "2024-01-15 09:00");
    }

    #[test]
    fn test_placed_lines_stay_inside_right_margin() {
        let config = DocumentConfig::default();
        let body = format!("{} {}\n{}", "W".repeat(150), "M".repeat(90), "word ".repeat(80));
        let transcript = Transcript::new(vec![message(0, "Alice", &body)], Default::default());
        let pages = layout_document(&transcript, &config, &HELVETICA);
        let right = config.page_width - config.margin;

        let placed: Vec<&PlacedText> = pages.iter().flat_map(|p| &p.lines).collect();
        assert!(placed.len() > 6);
        for line in placed {
            let end = line.x + HELVETICA.text_width(&line.text, line.size);
            assert!(end <= right + 0.01, "{:?} ends at {end}", line.text);
        }
    }
}
