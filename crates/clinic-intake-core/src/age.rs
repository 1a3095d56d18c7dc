//! Birth date parsing and age computation.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

fn canonical_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("static regex"))
}

/// Parse a birth date in canonical `YYYY-MM-DD` form.
///
/// Returns `None` for non-canonical shapes (`2004-1-5`, `15/01/2004`) and for
/// calendar dates that do not exist (`2023-02-29`).
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if !canonical_date_pattern().is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Completed years between `birth` and `as_of`.
///
/// Negative when `birth` is after `as_of`.
pub fn compute_age(birth: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut age = as_of.year() - birth.year();
    if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_canonical_date() {
        assert_eq!(parse_birth_date("2004-01-15"), Some(date(2004, 1, 15)));
        assert_eq!(parse_birth_date(" 2004-01-15 "), Some(date(2004, 1, 15)));
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        assert_eq!(parse_birth_date("2004-1-15"), None);
        assert_eq!(parse_birth_date("15/01/2004"), None);
        assert_eq!(parse_birth_date("20040115"), None);
        assert_eq!(parse_birth_date(""), None);
    }

    #[test]
    fn test_parse_rejects_non_ascii_digits() {
        assert_eq!(parse_birth_date("٢٠٠٤-٠١-١٥"), None);
        assert_eq!(parse_birth_date("２００４-０１-１５"), None);
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert_eq!(parse_birth_date("2023-02-29"), None);
        assert_eq!(parse_birth_date("2023-13-01"), None);
        assert_eq!(parse_birth_date("2024-02-29"), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let birth = date(2008, 6, 10);
        assert_eq!(compute_age(birth, date(2026, 6, 9)), 17);
        assert_eq!(compute_age(birth, date(2026, 6, 10)), 18);
        assert_eq!(compute_age(birth, date(2026, 12, 31)), 18);
    }

    #[test]
    fn test_age_same_day_of_birth() {
        assert_eq!(compute_age(date(2026, 3, 1), date(2026, 3, 1)), 0);
    }

    #[test]
    fn test_age_negative_for_future_birth() {
        assert_eq!(compute_age(date(2027, 1, 1), date(2026, 6, 1)), -1);
    }

    #[test]
    fn test_leap_day_birthday() {
        let birth = date(2008, 2, 29);
        assert_eq!(compute_age(birth, date(2026, 2, 28)), 17);
        assert_eq!(compute_age(birth, date(2026, 3, 1)), 18);
    }
}
