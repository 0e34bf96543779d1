//! Canonical `YYYY-MM-DD` date keys.
//!
//! The date key is the only join between month-grid cells and stored events,
//! so the grid side and the grouping side must produce byte-identical keys.
//! Everything here is zero-padded; a non-padded key is treated as malformed.

use chrono::{Datelike, Local, NaiveDate};

/// Format a (year, zero-based month, day) triple as a canonical date key.
pub fn date_key(year: i32, month0: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month0 + 1, day)
}

/// Parse a canonical date key back into (year, zero-based month, day).
///
/// Returns `None` unless the key is exactly in zero-padded `YYYY-MM-DD`
/// form and names a real calendar date.
pub fn parse_date_key(key: &str) -> Option<(i32, u32, u32)> {
    let parts: Vec<&str> = key.split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    if parts[0].len() != 4 || parts[1].len() != 2 || parts[2].len() != 2 {
        return None;
    }
    if !parts
        .iter()
        .all(|part| part.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let year: i32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let day: u32 = parts[2].parse().ok()?;

    // Rejects month 00/13, day 32, Feb 30 and friends.
    NaiveDate::from_ymd_opt(year, month, day)?;

    Some((year, month - 1, day))
}

/// Date key for today's local date, for "today" highlighting in the grid.
pub fn today_key() -> String {
    let now = Local::now();
    date_key(now.year(), now.month0(), now.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key_is_zero_padded() {
        assert_eq!(date_key(2025, 4, 2), "2025-05-02");
        assert_eq!(date_key(2025, 11, 31), "2025-12-31");
        assert_eq!(date_key(987, 0, 1), "0987-01-01");
    }

    #[test]
    fn test_parse_round_trips_format() {
        assert_eq!(parse_date_key("2025-05-02"), Some((2025, 4, 2)));
        assert_eq!(parse_date_key(&date_key(2024, 1, 29)), Some((2024, 1, 29)));
    }

    #[test]
    fn test_parse_rejects_non_padded_keys() {
        // Non-padded keys would silently break the grid/event join.
        assert_eq!(parse_date_key("2025-5-02"), None);
        assert_eq!(parse_date_key("2025-05-2"), None);
        assert_eq!(parse_date_key("25-05-02"), None);
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert_eq!(parse_date_key("2025-02-30"), None);
        assert_eq!(parse_date_key("2025-13-01"), None);
        assert_eq!(parse_date_key("2025-00-10"), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date_key(""), None);
        assert_eq!(parse_date_key("not-a-date"), None);
        assert_eq!(parse_date_key("2025-05-02T10:00:00"), None);
        assert_eq!(parse_date_key("2025/05/02"), None);
    }

    #[test]
    fn test_today_key_shape() {
        let key = today_key();
        assert!(parse_date_key(&key).is_some());
    }
}
