//! Independent validation rules.
//!
//! Each rule is a pure function of the record and a [`RuleContext`] derived
//! once per pass. Rules never look at each other's issues.

mod eligibility;
mod format;
mod guardian;
mod identity;

pub use eligibility::age_guardian_eligibility;
pub use format::field_format;
pub use guardian::guardian_completeness;
pub use identity::identity_date_correlation;

use chrono::NaiveDate;

use crate::age::{compute_age, parse_birth_date};
use crate::identity::NationalId;
use crate::models::{GuardianRecord, PatientRecord, ValidationIssue};
use crate::policy::ValidationPolicy;

/// Signature shared by every rule.
pub type RuleFn = fn(&PatientRecord, &RuleContext<'_>) -> Vec<ValidationIssue>;

/// A named rule, as run by the pipeline.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub evaluate: RuleFn,
}

/// Rules in execution order.
pub const RULES: [Rule; 4] = [
    Rule {
        name: "field_format",
        evaluate: field_format,
    },
    Rule {
        name: "guardian_completeness",
        evaluate: guardian_completeness,
    },
    Rule {
        name: "identity_date_correlation",
        evaluate: identity_date_correlation,
    },
    Rule {
        name: "age_guardian_eligibility",
        evaluate: age_guardian_eligibility,
    },
];

/// How much of the guardian sub-record was filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardianPresence {
    /// Every field empty (or no sub-record at all)
    Absent,
    /// Every field non-empty
    Complete,
    /// Some but not all fields non-empty
    Partial,
}

impl GuardianPresence {
    pub fn classify(guardian: Option<&GuardianRecord>) -> Self {
        let Some(guardian) = guardian else {
            return Self::Absent;
        };

        let fields = guardian.trimmed_fields();
        let filled = fields.iter().filter(|value| !value.is_empty()).count();
        match filled {
            0 => Self::Absent,
            n if n == fields.len() => Self::Complete,
            _ => Self::Partial,
        }
    }
}

/// Values derived from the record once per validation pass.
#[derive(Debug, Clone)]
pub struct RuleContext<'p> {
    /// Date the clock reported for this pass
    pub as_of: NaiveDate,
    pub policy: &'p ValidationPolicy,
    /// Parsed birth date, if canonical and real
    pub birth_date: Option<NaiveDate>,
    /// Completed years; only set when the birth date is not after `as_of`
    pub age: Option<i32>,
    /// National ID, if present and well-formed
    pub national_id: Option<NationalId>,
    pub guardian: GuardianPresence,
}

impl<'p> RuleContext<'p> {
    pub fn derive(record: &PatientRecord, as_of: NaiveDate, policy: &'p ValidationPolicy) -> Self {
        let birth_date = parse_birth_date(&record.date_of_birth);
        let age = birth_date
            .filter(|birth| *birth <= as_of)
            .map(|birth| compute_age(birth, as_of));

        Self {
            as_of,
            policy,
            birth_date,
            age,
            national_id: NationalId::parse(&record.national_id),
            guardian: GuardianPresence::classify(record.guardian.as_ref()),
        }
    }

    pub fn is_minor(&self) -> Option<bool> {
        let adult_age = i32::try_from(self.policy.adult_age).unwrap_or(i32::MAX);
        self.age.map(|age| age < adult_age)
    }
}
