//! National identity document parsing.
//!
//! Layout is fixed: `NNN-DDMMYY-NNNNA`, three digits, dash, six digits encoding
//! the holder's birth day/month/2-digit year, dash, four digits and one
//! uppercase letter.

use std::fmt;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Character range of the `DDMMYY` segment.
const BIRTH_FRAGMENT: std::ops::Range<usize> = 4..10;

fn national_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{3}-[0-9]{6}-[0-9]{4}[A-Z]$").expect("static regex"))
}

/// Whether `value` conforms to the national ID layout (no trimming).
pub fn is_well_formed(value: &str) -> bool {
    national_id_pattern().is_match(value)
}

/// A national ID that matched the fixed layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationalId(String);

impl NationalId {
    /// Parse a trimmed value; `None` when empty or malformed.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        is_well_formed(value).then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The embedded `DDMMYY` segment.
    pub fn birth_fragment(&self) -> &str {
        self.0.get(BIRTH_FRAGMENT).unwrap_or_default()
    }

    /// Whether the embedded segment encodes `birth`.
    pub fn matches_birth_date(&self, birth: NaiveDate) -> bool {
        self.birth_fragment() == birth_fragment_for(birth)
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Expected `DDMMYY` segment for a birth date.
pub fn birth_fragment_for(birth: NaiveDate) -> String {
    format!(
        "{:02}{:02}{:02}",
        birth.day(),
        birth.month(),
        birth.year().rem_euclid(100)
    )
}
