//! All-or-nothing population of the guardian sub-record.

use super::{GuardianPresence, RuleContext};
use crate::models::{paths, IssueCode, PatientRecord, ValidationIssue};

pub fn guardian_completeness(_record: &PatientRecord, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
    match ctx.guardian {
        GuardianPresence::Absent | GuardianPresence::Complete => Vec::new(),
        GuardianPresence::Partial => vec![ValidationIssue::new(
            paths::GUARDIAN,
            IssueCode::GuardianIncomplete,
            "complete all guardian fields if any is provided",
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GuardianRecord;
    use crate::policy::ValidationPolicy;
    use chrono::NaiveDate;

    fn run(guardian: Option<GuardianRecord>) -> Vec<ValidationIssue> {
        let policy = ValidationPolicy::default();
        let mut record = PatientRecord::new("Ana", "Ruiz", "2015-05-05");
        record.guardian = guardian;
        let ctx = RuleContext::derive(&record, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), &policy);
        guardian_completeness(&record, &ctx)
    }

    #[test]
    fn test_absent_guardian() {
        assert!(run(None).is_empty());
        assert!(run(Some(GuardianRecord::default())).is_empty());
    }

    #[test]
    fn test_complete_guardian() {
        let guardian = GuardianRecord::new("Luis Ruiz", "001-010180-0001B", "padre", "88887777");
        assert!(run(Some(guardian)).is_empty());
    }

    #[test]
    fn test_each_single_field_is_partial() {
        let partials = [
            GuardianRecord::new("Luis Ruiz", "", "", ""),
            GuardianRecord::new("", "001-010180-0001B", "", ""),
            GuardianRecord::new("", "", "padre", ""),
            GuardianRecord::new("", "", "", "88887777"),
        ];

        for guardian in partials {
            let issues = run(Some(guardian));
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].path, paths::GUARDIAN);
            assert_eq!(issues[0].code, IssueCode::GuardianIncomplete);
        }
    }

    #[test]
    fn test_three_of_four_is_partial() {
        let guardian = GuardianRecord::new("Luis Ruiz", "001-010180-0001B", "padre", "   ");
        assert_eq!(run(Some(guardian)).len(), 1);
    }
}
