//! Date and time text normalization.
//!
//! Sheets hand us dates in several shapes: the query-table token
//! `Date(2025,10,5)` (zero-based month), `11/5/2025`, or `2025-11-05`.
//! Display text is canonicalized best-effort; the strict instant parser used
//! for ordering only accepts `YYYY-MM-DD` plus `H:MM AM|PM`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static STRUCTURED_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Date\((\d{4}),\s*(\d{1,2}),\s*(\d{1,2})").expect("valid regex"));
static STRUCTURED_DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Date\((\d{4}),\s*(\d{1,2}),\s*(\d{1,2}),\s*(\d{1,2}),\s*(\d{1,2}),\s*(\d{1,2})\)")
        .expect("valid regex")
});
static US_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid regex"));
static CANONICAL_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid regex"));
static CANONICAL_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s*([AP]M)$").expect("valid regex"));

fn capture_u32(caps: &regex::Captures<'_>, idx: usize) -> u32 {
    // The patterns only capture runs of 1-4 digits
    caps.get(idx)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Canonicalize a date to `YYYY-MM-DD` when recognized, else return it trimmed
pub fn normalize_date_text(input: &str) -> String {
    let trimmed = input.trim();

    if let Some(caps) = STRUCTURED_DATE.captures(trimmed) {
        let year = &caps[1];
        let month = capture_u32(&caps, 2) + 1;
        let day = capture_u32(&caps, 3);
        return format!("{year}-{month:02}-{day:02}");
    }

    if let Some(caps) = US_DATE.captures(trimmed) {
        let month = capture_u32(&caps, 1);
        let day = capture_u32(&caps, 2);
        let year = &caps[3];
        return format!("{year}-{month:02}-{day:02}");
    }

    trimmed.to_string()
}

/// Convert the structured token's hour/minute to `H:MM AM|PM`, else return the
/// text trimmed
pub fn normalize_time_text(input: &str) -> String {
    let trimmed = input.trim();

    if let Some(caps) = STRUCTURED_DATETIME.captures(trimmed) {
        let hour = capture_u32(&caps, 4);
        let minute = capture_u32(&caps, 5);
        let meridiem = if hour >= 12 { "PM" } else { "AM" };
        let hour12 = match hour % 12 {
            0 => 12,
            h => h,
        };
        return format!("{hour12}:{minute:02} {meridiem}");
    }

    trimmed.to_string()
}

/// Strict combined parse. `None` means unparsable, which is a normal outcome.
///
/// Out-of-range values such as `2025-02-30` or `13:00 PM` are rejected. A
/// browser `Date` would roll them over into the next month or day; here
/// such shows stay unparsable, so they are never hidden as past and sort
/// first.
pub fn parse_instant(date: &str, time: Option<&str>) -> Option<NaiveDateTime> {
    let time = time?.trim();
    let date_caps = CANONICAL_DATE.captures(date.trim())?;
    let time_caps = CANONICAL_TIME.captures(time)?;

    let year: i32 = date_caps[1].parse().ok()?;
    let month = capture_u32(&date_caps, 2);
    let day = capture_u32(&date_caps, 3);

    let mut hour = capture_u32(&time_caps, 1);
    let minute = capture_u32(&time_caps, 2);
    let pm = time_caps[3].eq_ignore_ascii_case("PM");
    if pm && hour != 12 {
        hour += 12;
    }
    if !pm && hour == 12 {
        hour = 0;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(NaiveDateTime::new(date, time))
}

/// `YYYY-MM` key for an instant
pub fn month_key(instant: &NaiveDateTime) -> String {
    instant.format("%Y-%m").to_string()
}

/// Human label for a `YYYY-MM` key, e.g. `November 2025`
pub fn month_label(key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d")
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|_| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_date_shifts_month() {
        assert_eq!(normalize_date_text("Date(2025,10,5)"), "2025-11-05");
        assert_eq!(normalize_date_text("Date(2025, 0, 31, 20, 0, 0)"), "2025-01-31");
    }

    #[test]
    fn test_us_date_zero_pads() {
        assert_eq!(normalize_date_text("11/5/2025"), "2025-11-05");
        assert_eq!(normalize_date_text(" 1/09/2026 "), "2026-01-09");
    }

    #[test]
    fn test_canonical_and_unknown_dates_pass_through() {
        assert_eq!(normalize_date_text("2025-11-05"), "2025-11-05");
        assert_eq!(normalize_date_text("Nov 5th-ish"), "Nov 5th-ish");
        assert_eq!(normalize_date_text(""), "");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for raw in ["Date(2025,10,5)", "11/5/2025", "TBD"] {
            let once = normalize_date_text(raw);
            assert_eq!(normalize_date_text(&once), once);
        }
        for raw in ["Date(1899,11,30,19,30,0)", "7:30 PM", "late"] {
            let once = normalize_time_text(raw);
            assert_eq!(normalize_time_text(&once), once);
        }
    }

    #[test]
    fn test_structured_time_to_twelve_hour() {
        assert_eq!(normalize_time_text("Date(1899,11,30,19,30,0)"), "7:30 PM");
        assert_eq!(normalize_time_text("Date(1899,11,30,0,5,0)"), "12:05 AM");
        assert_eq!(normalize_time_text("Date(1899,11,30,12,0,0)"), "12:00 PM");
        assert_eq!(normalize_time_text("Date(1899,11,30,9,45,0)"), "9:45 AM");
        assert_eq!(normalize_time_text("doors at 7"), "doors at 7");
    }

    #[test]
    fn test_parse_instant_strict_forms() {
        let dt = parse_instant("2025-11-05", Some("7:30 PM")).unwrap();
        assert_eq!(dt.to_string(), "2025-11-05 19:30:00");
        assert_eq!(month_key(&dt), "2025-11");

        let midnight = parse_instant("2025-11-05", Some("12:00 am")).unwrap();
        assert_eq!(midnight.to_string(), "2025-11-05 00:00:00");
        let noon = parse_instant("2025-11-05", Some("12:15PM")).unwrap();
        assert_eq!(noon.to_string(), "2025-11-05 12:15:00");
    }

    #[test]
    fn test_parse_instant_rejects_deviations() {
        assert!(parse_instant("2025-11-05", None).is_none());
        assert!(parse_instant("11/5/2025", Some("7:30 PM")).is_none());
        assert!(parse_instant("2025-11-05", Some("19:30")).is_none());
        assert!(parse_instant("2025-11-05", Some("7:3 PM")).is_none());
        assert!(parse_instant("2025-02-30", Some("7:30 PM")).is_none());
        assert!(parse_instant("2025-11-05", Some("13:00 PM")).is_none());
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label("2025-11"), "November 2025");
        assert_eq!(month_label("garbage"), "garbage");
    }
}
