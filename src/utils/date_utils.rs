use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses an ISO-8601 date or timestamp and keeps only the calendar date as written.
///
/// Accepts RFC 3339 with an offset (`2026-01-05T00:00:00.000Z`), a naive
/// timestamp (`2026-01-05T09:30:00`) or a bare date (`2026-01-05`). The offset
/// is never applied, so `2026-01-05T23:00:00-05:00` stays on the 5th.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn browser_iso_string_truncates_to_date() {
        assert_eq!(parse_iso_date("2026-03-14T18:30:00.000Z"), Some(date(2026, 3, 14)));
    }

    #[test]
    fn offset_is_not_applied() {
        assert_eq!(parse_iso_date("2026-03-14T23:00:00-05:00"), Some(date(2026, 3, 14)));
        assert_eq!(parse_iso_date("2026-03-14T01:00:00+06:00"), Some(date(2026, 3, 14)));
    }

    #[test]
    fn naive_forms_are_accepted() {
        assert_eq!(parse_iso_date("2026-03-14T09:15:00"), Some(date(2026, 3, 14)));
        assert_eq!(parse_iso_date("2026-03-14T09:15"), Some(date(2026, 3, 14)));
        assert_eq!(parse_iso_date("2026-03-14"), Some(date(2026, 3, 14)));
        assert_eq!(parse_iso_date(" 2026-03-14 "), Some(date(2026, 3, 14)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_iso_date(""), None);
        assert_eq!(parse_iso_date("tomorrow"), None);
        assert_eq!(parse_iso_date("14/03/2026"), None);
        assert_eq!(parse_iso_date("2026-02-30"), None);
    }
}
