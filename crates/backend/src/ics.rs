//! iCalendar (RFC 5545) serialization of sermon records.
//!
//! `encode_calendar` is a pure function: given the same records and timestamp
//! it produces byte-identical output. All I/O and record selection happens in
//! the feed handler; nothing here touches the database.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use shared_types::Sermon;
use thiserror::Error;

/// Product identifier emitted in the VCALENDAR header.
pub const PRODID: &str = "-//Pastor Sermon Studio//EN";

/// Domain suffix for event UIDs. Stable across encodings so calendar
/// clients can deduplicate and update events by UID.
pub const UID_DOMAIN: &str = "sermon-studio";

/// Fallback summary for sermons with no title.
const DEFAULT_SUMMARY: &str = "Sermon";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The wire format carries dates as fixed-width four-digit years, so
    /// anything outside year 0..=9999 cannot be emitted.
    #[error("date {0} cannot be represented in calendar output")]
    UnrepresentableDate(String),
}

/// The closed set of shapes a sermon can take as a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventTiming {
    /// Explicit start instant, optionally with an end. A missing end means a
    /// point-in-time event, not a defaulted duration.
    Timed {
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    },
    /// Date only, emitted as an all-day event.
    AllDay(NaiveDate),
    /// Neither date nor start time. The event block is still emitted with
    /// UID/DTSTAMP/SUMMARY, just without DTSTART.
    Unscheduled,
}

impl EventTiming {
    fn of(sermon: &Sermon) -> Self {
        match (sermon.start_time, sermon.date) {
            (Some(start), _) => EventTiming::Timed {
                start,
                end: sermon.end_time,
            },
            (None, Some(date)) => EventTiming::AllDay(date),
            (None, None) => EventTiming::Unscheduled,
        }
    }
}

/// Serialize sermons into a complete VCALENDAR document.
///
/// Every line, including the last, is CRLF-terminated. `now` becomes the
/// DTSTAMP of each event; passing it in keeps the function deterministic.
pub fn encode_calendar(sermons: &[Sermon], now: DateTime<Utc>) -> Result<String, EncodeError> {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PRODID),
        "CALSCALE:GREGORIAN".to_string(),
    ];

    let dtstamp = format_utc_datetime(now)?;

    for sermon in sermons {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}@{}", sermon.id, UID_DOMAIN));
        lines.push(format!("DTSTAMP:{}", dtstamp));

        match EventTiming::of(sermon) {
            EventTiming::Timed { start, end } => {
                lines.push(format!("DTSTART:{}", format_utc_datetime(start)?));
                if let Some(end) = end {
                    lines.push(format!("DTEND:{}", format_utc_datetime(end)?));
                }
            }
            EventTiming::AllDay(date) => {
                lines.push(format!("DTSTART;VALUE=DATE:{}", format_date(date)?));
            }
            EventTiming::Unscheduled => {}
        }

        lines.push(format!("SUMMARY:{}", escape_text(summary(sermon))));

        if let Some(location) = non_empty(sermon.location.as_deref()) {
            lines.push(format!("LOCATION:{}", escape_text(location)));
        }

        if let Some(description) = description(sermon) {
            lines.push(format!("DESCRIPTION:{}", escape_text(&description)));
        }

        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    let mut out = String::new();
    for line in &lines {
        out.push_str(line);
        out.push_str("\r\n");
    }
    Ok(out)
}

fn summary(sermon: &Sermon) -> &str {
    non_empty(sermon.title.as_deref()).unwrap_or(DEFAULT_SUMMARY)
}

/// Description sections in fixed order: theme, passages, notes.
/// Returns `None` when all three are empty so the line is omitted entirely.
fn description(sermon: &Sermon) -> Option<String> {
    let mut sections = Vec::new();

    if let Some(theme) = non_empty(sermon.theme.as_deref()) {
        sections.push(format!("Theme: {}", theme));
    }

    let passages: Vec<&str> = sermon
        .passages
        .iter()
        .flatten()
        .filter_map(|passage| non_empty(passage.as_deref()))
        .collect();
    if !passages.is_empty() {
        sections.push(format!("Passages: {}", passages.join(", ")));
    }

    if let Some(notes) = non_empty(sermon.notes.as_deref()) {
        sections.push(format!("Notes: {}", notes));
    }

    if sections.is_empty() {
        None
    } else {
        Some(sections.join("\n"))
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

/// Escape TEXT property values: backslash, semicolon, comma, and line breaks.
/// Line breaks become the literal two-character sequence `\n`, never a raw
/// break in the output stream.
fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// UTC date-time in `YYYYMMDDTHHMMSSZ` form. Inputs are already UTC instants;
/// any original offset was converted, not reformatted, on the way in.
fn format_utc_datetime(instant: DateTime<Utc>) -> Result<String, EncodeError> {
    if !(0..=9999).contains(&instant.year()) {
        return Err(EncodeError::UnrepresentableDate(instant.to_rfc3339()));
    }
    Ok(instant.format("%Y%m%dT%H%M%SZ").to_string())
}

/// Calendar date in `YYYYMMDD` form for all-day events.
fn format_date(date: NaiveDate) -> Result<String, EncodeError> {
    if !(0..=9999).contains(&date.year()) {
        return Err(EncodeError::UnrepresentableDate(date.to_string()));
    }
    Ok(date.format("%Y%m%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn make_sermon() -> Sermon {
        Sermon {
            id: Uuid::parse_str("5f0c1ad8-2b85-4f94-9c1e-0d3c4a8f2b11").expect("valid uuid"),
            church_id: None,
            series_id: None,
            title: Some("Grace Abounding".to_string()),
            theme: None,
            date: None,
            start_time: None,
            end_time: None,
            location: None,
            passages: None,
            notes: None,
            setlist: None,
            is_series_item: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn encode_one(sermon: Sermon) -> String {
        encode_calendar(&[sermon], now()).expect("encoding should succeed")
    }

    #[test]
    fn document_framing_is_complete() {
        let out = encode_one(make_sermon());
        assert!(out.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(out.contains("VERSION:2.0\r\n"));
        assert!(out.contains("PRODID:-//Pastor Sermon Studio//EN\r\n"));
        assert!(out.contains("CALSCALE:GREGORIAN\r\n"));
        assert!(out.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn every_line_is_crlf_terminated() {
        let mut sermon = make_sermon();
        sermon.notes = Some("line one\nline two".to_string());
        let out = encode_one(sermon);

        // Stripping CRLF pairs must leave no raw line break behind.
        let stripped = out.replace("\r\n", "");
        assert!(!stripped.contains('\n'));
        assert!(!stripped.contains('\r'));
    }

    #[test]
    fn uid_is_stable_across_encoding_timestamps() {
        let sermon = make_sermon();
        let first = encode_calendar(std::slice::from_ref(&sermon), now()).unwrap();
        let second = encode_calendar(
            std::slice::from_ref(&sermon),
            Utc.with_ymd_and_hms(2025, 7, 4, 8, 30, 0).unwrap(),
        )
        .unwrap();

        let uid = "UID:5f0c1ad8-2b85-4f94-9c1e-0d3c4a8f2b11@sermon-studio\r\n";
        assert!(first.contains(uid));
        assert!(second.contains(uid));
    }

    #[test]
    fn dtstamp_comes_from_the_supplied_timestamp() {
        let out = encode_one(make_sermon());
        assert!(out.contains("DTSTAMP:20240310T120000Z\r\n"));
    }

    #[test]
    fn timed_event_wins_over_all_day_date() {
        let mut sermon = make_sermon();
        sermon.date = Some(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        sermon.start_time = Some(Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap());
        sermon.end_time = Some(Utc.with_ymd_and_hms(2024, 6, 15, 11, 0, 0).unwrap());
        let out = encode_one(sermon);

        assert!(out.contains("DTSTART:20240615T093000Z\r\n"));
        assert!(out.contains("DTEND:20240615T110000Z\r\n"));
        assert!(!out.contains("VALUE=DATE"));
    }

    #[test]
    fn start_without_end_emits_no_dtend() {
        let mut sermon = make_sermon();
        sermon.start_time = Some(Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap());
        let out = encode_one(sermon);

        assert!(out.contains("DTSTART:20240615T093000Z\r\n"));
        assert!(!out.contains("DTEND"));
    }

    #[test]
    fn date_only_becomes_all_day_event() {
        let mut sermon = make_sermon();
        sermon.date = Some(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap());
        let out = encode_one(sermon);

        assert!(out.contains("DTSTART;VALUE=DATE:20241225\r\n"));
        assert!(!out.contains("DTEND"));
    }

    #[test]
    fn offset_input_is_converted_to_utc() {
        let mut sermon = make_sermon();
        sermon.start_time = Some(
            DateTime::parse_from_rfc3339("2024-06-15T10:30:00+02:00")
                .unwrap()
                .with_timezone(&Utc),
        );
        let out = encode_one(sermon);

        assert!(out.contains("DTSTART:20240615T083000Z\r\n"));
    }

    #[test]
    fn unscheduled_sermon_still_emits_event_block() {
        let out = encode_one(make_sermon());

        assert!(out.contains("BEGIN:VEVENT\r\n"));
        assert!(out.contains("SUMMARY:Grace Abounding\r\n"));
        assert!(out.contains("END:VEVENT\r\n"));
        assert!(!out.contains("DTSTART"));
        assert!(!out.contains("DTEND"));
    }

    #[test]
    fn missing_title_defaults_to_sermon() {
        let mut sermon = make_sermon();
        sermon.title = None;
        assert!(encode_one(sermon).contains("SUMMARY:Sermon\r\n"));

        let mut sermon = make_sermon();
        sermon.title = Some(String::new());
        assert!(encode_one(sermon).contains("SUMMARY:Sermon\r\n"));
    }

    #[test]
    fn location_is_omitted_when_empty() {
        let mut sermon = make_sermon();
        sermon.location = Some(String::new());
        assert!(!encode_one(sermon).contains("LOCATION"));

        let mut sermon = make_sermon();
        sermon.location = Some("Main Hall".to_string());
        assert!(encode_one(sermon).contains("LOCATION:Main Hall\r\n"));
    }

    #[test]
    fn description_sections_keep_fixed_order() {
        let mut sermon = make_sermon();
        sermon.theme = Some("hope".to_string());
        sermon.passages = Some(vec![
            Some("John 3:16".to_string()),
            Some("Psalm 23:1".to_string()),
        ]);
        sermon.notes = Some("Opening hymn first".to_string());
        let out = encode_one(sermon);

        assert!(out.contains(
            "DESCRIPTION:Theme: hope\\nPassages: John 3:16\\, Psalm 23:1\\nNotes: Opening hymn first\r\n"
        ));
    }

    #[test]
    fn empty_description_is_omitted() {
        let mut sermon = make_sermon();
        sermon.theme = Some(String::new());
        sermon.passages = Some(vec![]);
        sermon.notes = None;
        assert!(!encode_one(sermon).contains("DESCRIPTION"));
    }

    #[test]
    fn line_breaks_in_notes_are_escaped() {
        let mut sermon = make_sermon();
        sermon.notes = Some("first line\nsecond line\r\nthird line".to_string());
        let out = encode_one(sermon);

        assert!(out.contains("DESCRIPTION:Notes: first line\\nsecond line\\nthird line\r\n"));
    }

    #[test]
    fn delimiters_and_backslashes_are_escaped() {
        assert_eq!(escape_text("a,b;c\\d"), "a\\,b\\;c\\\\d");
        assert_eq!(escape_text("plain text"), "plain text");
        assert_eq!(escape_text("one\r\ntwo"), "one\\ntwo");
    }

    #[test]
    fn far_future_date_is_rejected() {
        let mut sermon = make_sermon();
        sermon.date = NaiveDate::from_ymd_opt(10_000, 1, 1);
        let err = encode_calendar(&[sermon], now()).unwrap_err();
        assert!(matches!(err, EncodeError::UnrepresentableDate(_)));
    }

    #[test]
    fn multiple_sermons_each_get_an_event_block() {
        let mut second = make_sermon();
        second.id = Uuid::parse_str("9d7a6cf2-11e0-4b3a-8f60-7c2d9e5a1c42").unwrap();
        second.title = Some("Advent Week 2".to_string());
        let out = encode_calendar(&[make_sermon(), second], now()).unwrap();

        assert_eq!(out.matches("BEGIN:VEVENT\r\n").count(), 2);
        assert_eq!(out.matches("END:VEVENT\r\n").count(), 2);
    }
}
