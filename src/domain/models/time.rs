//! Parsing of user supplied timestamps.
//!
//! All instants are UTC. Inputs may be RFC 3339, a naive `YYYY-MM-DDTHH:MM[:SS]`
//! (space separator accepted) or a bare `YYYY-MM-DD`, which means midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    parse_day(raw).map(start_of_day)
}

pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_instant_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 12, 5, 8, 30, 0).unwrap();
        assert_eq!(parse_instant("2026-12-05T08:30:00Z"), Some(expected));
        assert_eq!(parse_instant("2026-12-05T10:30:00+02:00"), Some(expected));
        assert_eq!(parse_instant("2026-12-05T08:30"), Some(expected));
        assert_eq!(parse_instant("2026-12-05 08:30:00"), Some(expected));
    }

    #[test]
    fn test_bare_date_is_midnight() {
        let expected = Utc.with_ymd_and_hms(2026, 12, 3, 0, 0, 0).unwrap();
        assert_eq!(parse_instant("2026-12-03"), Some(expected));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_instant("yesterday"), None);
        assert_eq!(parse_day("2026-13-01"), None);
    }
}
