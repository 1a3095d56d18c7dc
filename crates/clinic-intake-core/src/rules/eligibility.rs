//! Minor/adult guardian requirements.

use super::{GuardianPresence, RuleContext};
use crate::models::{paths, IssueCode, PatientRecord, ValidationIssue};

/// Both sub-checks always run. They cannot both fire for a consistent record,
/// but contradictory input surfaces both issues.
///
/// The adult branch is gated on a well-formed national ID, not on age alone:
/// an adult without an ID is never told to drop the guardian.
pub fn age_guardian_eligibility(
    _record: &PatientRecord,
    ctx: &RuleContext<'_>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let Some(is_minor) = ctx.is_minor() else {
        return issues;
    };

    if is_minor && ctx.guardian == GuardianPresence::Absent {
        issues.push(ValidationIssue::new(
            paths::GUARDIAN,
            IssueCode::MinorRequiresGuardian,
            "a minor patient requires guardian information",
        ));
    }

    if !is_minor && ctx.national_id.is_some() && ctx.guardian == GuardianPresence::Complete {
        issues.push(ValidationIssue::new(
            paths::GUARDIAN,
            IssueCode::AdultGuardianForbidden,
            "an adult patient with identity document must not provide guardian information",
        ));
    }

    issues
}
