//! Minimal iCalendar (RFC 5545) writer.

use chrono::{DateTime, Utc};

use super::{CalendarEvent, EventEnd};

const LINE_LIMIT_OCTETS: usize = 75;
const UID_HASH_CHARS: usize = 32;

/// Render a complete `VCALENDAR` with one `VEVENT` per event.
///
/// `stamp` becomes every event's `DTSTAMP`. Lines are CRLF-terminated and
/// folded at 75 octets.
pub fn render_ics(events: &[CalendarEvent], stamp: DateTime<Utc>) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!(
            "PRODID:-//{name}//{name} {version}//EN",
            name = env!("CARGO_PKG_NAME"),
            version = env!("CARGO_PKG_VERSION")
        ),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
    ];

    for event in events {
        lines.extend(event_lines(event, stamp));
    }
    lines.push("END:VCALENDAR".to_string());

    lines
        .iter()
        .map(|line| fold_line(line) + "\r\n")
        .collect()
}

fn event_lines(event: &CalendarEvent, stamp: DateTime<Utc>) -> Vec<String> {
    let mut lines = vec![
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", event_uid(event)),
        format!("SUMMARY:{}", escape_text(&event.title)),
        format!("DTSTAMP:{}", format_utc(stamp)),
        format!("DTSTART:{}", format_utc(event.start)),
    ];

    match event.end {
        EventEnd::Minutes(m) => lines.push(format!("DURATION:PT{m}M")),
        EventEnd::Until(t) => lines.push(format!("DTEND:{}", format_utc(t))),
    }

    if let Some(alarm) = &event.alarm {
        let description = alarm.description.as_deref().unwrap_or(&event.title);
        lines.extend([
            "BEGIN:VALARM".to_string(),
            "ACTION:DISPLAY".to_string(),
            format!("DESCRIPTION:{}", escape_text(description)),
            format!("TRIGGER:-PT{}M", alarm.minutes_before),
            "END:VALARM".to_string(),
        ]);
    }

    lines.push("END:VEVENT".to_string());
    lines
}

/// UTC date-time in the iCalendar basic format, e.g. `20240610T043000Z`.
pub fn format_utc(t: DateTime<Utc>) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Stable identifier from title and start.
pub fn event_uid(event: &CalendarEvent) -> String {
    let digest = sha256::digest(format!("{}|{}", event.title, format_utc(event.start)));
    format!(
        "{}@{}",
        &digest[..UID_HASH_CHARS],
        env!("CARGO_PKG_NAME")
    )
}

/// Escape a TEXT value: backslash, semicolon, comma and newlines.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Fold a content line so no physical line exceeds 75 octets.
///
/// Continuation lines start with a single space, which counts toward the
/// limit. Multi-byte characters are never split.
pub fn fold_line(line: &str) -> String {
    if line.len() <= LINE_LIMIT_OCTETS {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / LINE_LIMIT_OCTETS * 3);
    let mut current = 0;

    for c in line.chars() {
        let width = c.len_utf8();
        if current + width > LINE_LIMIT_OCTETS {
            out.push_str("\r\n ");
            current = 1;
        }
        out.push(c);
        current += width;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_utc() {
        let t = Utc.with_ymd_and_hms(2024, 6, 10, 4, 30, 0).unwrap();
        assert_eq!(format_utc(t), "20240610T043000Z");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("Stop the work and relax!"), "Stop the work and relax!");
        assert_eq!(escape_text("a,b;c\\d\ne"), "a\\,b\\;c\\\\d\\ne");
    }

    #[test]
    fn test_short_line_is_not_folded() {
        let line = "SUMMARY:Breakfast";
        assert_eq!(fold_line(line), line);
    }

    #[test]
    fn test_long_line_folds_at_75_octets() {
        let line = format!("DESCRIPTION:{}", "x".repeat(200));
        let folded = fold_line(&line);

        for physical in folded.split("\r\n") {
            assert!(physical.len() <= 75, "{} octets", physical.len());
        }
        let rest: Vec<&str> = folded.split("\r\n").skip(1).collect();
        assert!(rest.iter().all(|l| l.starts_with(' ')));

        // Unfolding restores the original
        assert_eq!(folded.replace("\r\n ", ""), line);
    }

    #[test]
    fn test_folding_keeps_multibyte_chars_whole() {
        let line = format!("SUMMARY:{}", "ä".repeat(60));
        let folded = fold_line(&line);
        for physical in folded.split("\r\n") {
            assert!(physical.len() <= 75);
        }
        assert_eq!(folded.replace("\r\n ", ""), line);
    }
}
