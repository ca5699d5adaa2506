//! Property-based tests for kakaopack.
//!
//! These tests generate random exports to check the assembly invariants.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use kakaopack::config::TableConfig;
use kakaopack::core::render_table;
use kakaopack::encoding::resolve;
use kakaopack::parsers::KakaoTalkParser;
use kakaopack::parsing::classify_line;

/// A generated message: (pm, hour 1..=12, minute, sender, body lines)
type GenMessage = (bool, u32, u32, String, Vec<String>);

fn arb_sender() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Alice".to_string(),
        "Bob".to_string(),
        "홍길동".to_string(),
        "김철수".to_string(),
        "User 123".to_string(),
    ])
}

/// Body lines that can never be mistaken for a divider or header.
fn arb_line() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "hello".to_string(),
        "안녕하세요".to_string(),
        "내일 봐요 :)".to_string(),
        "see [this] link".to_string(),
        "1, 2, 3".to_string(),
        "🎉 축하해".to_string(),
        "ㅋㅋㅋ".to_string(),
    ])
}

fn arb_message() -> impl Strategy<Value = GenMessage> {
    (
        any::<bool>(),
        1u32..=12,
        0u32..60,
        arb_sender(),
        prop::collection::vec(arb_line(), 1..4),
    )
}

/// Days as offsets from a base date, each with its messages.
fn arb_days() -> impl Strategy<Value = Vec<(u64, Vec<GenMessage>)>> {
    prop::collection::vec((0u64..400, prop::collection::vec(arb_message(), 0..4)), 1..6)
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 12, 25).unwrap()
}

fn marker(pm: bool) -> &'static str {
    if pm { "오후" } else { "오전" }
}

fn divider_export(days: &[(u64, Vec<GenMessage>)]) -> (String, Vec<(NaiveDate, Vec<String>)>) {
    let mut text = String::from("테스트 님과 카카오톡 대화\n저장한 날짜 : 2024-06-01\n\n");
    let mut expected = Vec::new();

    for (offset, messages) in days {
        let date = base_date().checked_add_days(Days::new(*offset)).unwrap();
        text.push_str(&format!(
            "--------------- {} ---------------\n",
            date.format("%Y년 %-m월 %-d일 %A")
        ));
        for (pm, hour, minute, sender, lines) in messages {
            text.push_str(&format!("[{}] [{} {}:{:02}] {}\n", sender, marker(*pm), hour, minute, lines[0]));
            for line in &lines[1..] {
                text.push_str(line);
                text.push('\n');
            }
            expected.push((date, lines.clone()));
        }
    }
    (text, expected)
}

fn dotted_export(messages: &[GenMessage]) -> String {
    let mut text = String::new();
    for (pm, hour, minute, sender, lines) in messages {
        text.push_str(&format!("2024. 3. 9. {} {}:{:02}, {}, {}\n", marker(*pm), hour, minute, sender, lines[0]));
        for line in &lines[1..] {
            text.push_str(line);
            text.push('\n');
        }
    }
    text
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every message carries the date of the last divider before its header.
    #[test]
    fn prop_divider_dates_follow_dividers(days in arb_days()) {
        let (text, expected) = divider_export(&days);
        let parsed = KakaoTalkParser::new().parse_str(&text);

        if expected.is_empty() {
            prop_assert!(parsed.unwrap_err().is_no_messages());
        } else {
            let transcript = parsed.unwrap();
            prop_assert_eq!(transcript.len(), expected.len());
            for (message, (date, _)) in transcript.iter().zip(&expected) {
                prop_assert_eq!(message.timestamp.date(), *date);
            }
        }
    }

    /// Continuation lines are kept in order, joined by line breaks.
    #[test]
    fn prop_continuations_preserved(days in arb_days()) {
        let (text, expected) = divider_export(&days);
        prop_assume!(!expected.is_empty());

        let transcript = KakaoTalkParser::new().parse_str(&text).unwrap();
        for (message, (_, lines)) in transcript.iter().zip(&expected) {
            prop_assert_eq!(&message.body, &lines.join("\n"));
        }
    }

    /// 12-hour markers convert to the right 24-hour time.
    #[test]
    fn prop_dotted_times(messages in prop::collection::vec(arb_message(), 1..10)) {
        let transcript = KakaoTalkParser::new().parse_str(&dotted_export(&messages)).unwrap();
        prop_assert_eq!(transcript.len(), messages.len());

        for (message, (pm, hour, minute, sender, _)) in transcript.iter().zip(&messages) {
            let expected_hour = match (*pm, *hour) {
                (false, 12) => 0,
                (true, 12) => 12,
                (false, h) => h,
                (true, h) => h + 12,
            };
            prop_assert_eq!(message.timestamp_string(), format!("2024-03-09 {:02}:{:02}", expected_hour, minute));
            prop_assert_eq!(&message.sender, sender);
        }
    }

    /// The table has one header row plus one row per message.
    #[test]
    fn prop_table_round_trip(messages in prop::collection::vec(arb_message(), 1..8)) {
        let transcript = KakaoTalkParser::new().parse_str(&dotted_export(&messages)).unwrap();
        let table = render_table(&transcript, &TableConfig::new()).unwrap();

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(table.bytes)).unwrap();
        let range = workbook.worksheet_range("카카오톡 대화").unwrap();
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(|cell| match cell {
                Data::String(s) => s.clone(),
                other => other.to_string(),
            }).collect())
            .collect();

        prop_assert_eq!(rows.len(), transcript.len() + 1);
        for (row, message) in rows.iter().skip(1).zip(transcript.iter()) {
            prop_assert_eq!(&row[0], &message.timestamp_string());
            prop_assert_eq!(&row[1], &message.sender);
            prop_assert_eq!(&row[2], &message.body);
        }
    }

    /// Classification is total over arbitrary text.
    #[test]
    fn prop_classify_never_panics(line in ".{0,120}", seen in any::<bool>()) {
        let _ = classify_line(&line, seen);
    }

    /// Encoding resolution is total over arbitrary bytes.
    #[test]
    fn prop_resolve_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let decoded = resolve(&bytes);
        prop_assert!(decoded.lines.iter().all(|line| !line.contains('\n')));
    }
}
