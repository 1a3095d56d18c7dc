//! National ID birth segment vs. declared birth date.

use super::RuleContext;
use crate::models::{paths, IssueCode, PatientRecord, ValidationIssue};

/// Skipped unless both the ID is well-formed and the birth date parses; the
/// format rule already reports either problem.
pub fn identity_date_correlation(
    _record: &PatientRecord,
    ctx: &RuleContext<'_>,
) -> Vec<ValidationIssue> {
    let (Some(national_id), Some(birth)) = (&ctx.national_id, ctx.birth_date) else {
        return Vec::new();
    };

    if national_id.matches_birth_date(birth) {
        return Vec::new();
    }

    vec![ValidationIssue::new(
        paths::NATIONAL_ID,
        IssueCode::NationalIdBirthDateMismatch,
        "identity document does not match the declared birth date",
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ValidationPolicy;
    use chrono::NaiveDate;

    fn run(national_id: &str, date_of_birth: &str) -> Vec<ValidationIssue> {
        let policy = ValidationPolicy::default();
        let record = PatientRecord::new("Ana", "Ruiz", date_of_birth).with_national_id(national_id);
        let ctx = RuleContext::derive(&record, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(), &policy);
        identity_date_correlation(&record, &ctx)
    }

    #[test]
    fn test_matching_fragment() {
        assert!(run("001-150104-0002A", "2004-01-15").is_empty());
    }

    #[test]
    fn test_mismatching_fragment() {
        let issues = run("001-150104-0002A", "1990-03-20");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, paths::NATIONAL_ID);
        assert_eq!(issues[0].code, IssueCode::NationalIdBirthDateMismatch);
    }

    #[test]
    fn test_day_month_swap_is_a_mismatch() {
        assert_eq!(run("001-011504-0002A", "2004-01-15").len(), 1);
    }

    #[test]
    fn test_skipped_for_malformed_id() {
        assert!(run("001-150104-0002", "1990-03-20").is_empty());
        assert!(run("", "1990-03-20").is_empty());
    }

    #[test]
    fn test_skipped_for_unparsable_date() {
        assert!(run("001-150104-0002A", "20/03/1990").is_empty());
        assert!(run("001-150104-0002A", "").is_empty());
    }
}
