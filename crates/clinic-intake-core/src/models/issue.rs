//! Validation issues and the aggregated report.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Field locators, resolvable against the camelCase JSON shape of a record.
pub mod paths {
    pub const FIRST_NAMES: &str = "firstNames";
    pub const LAST_NAMES: &str = "lastNames";
    pub const DATE_OF_BIRTH: &str = "dateOfBirth";
    pub const NATIONAL_ID: &str = "nationalId";
    pub const CONTACT_PHONE: &str = "contactPhone";
    pub const CONTACT_EMAIL: &str = "contactEmail";
    pub const ADDRESS: &str = "address";
    pub const ALLERGIES: &str = "allergies";
    pub const MEDICAL_HISTORY: &str = "medicalHistory";
    pub const CURRENT_MEDICATIONS: &str = "currentMedications";

    /// The guardian sub-record as a whole.
    pub const GUARDIAN: &str = "guardian";
    pub const GUARDIAN_FULL_NAME: &str = "guardian.fullName";
    pub const GUARDIAN_NATIONAL_ID: &str = "guardian.nationalId";
    pub const GUARDIAN_RELATIONSHIP: &str = "guardian.relationship";
    pub const GUARDIAN_CONTACT_PHONE: &str = "guardian.contactPhone";
}

/// Broad class of a rule violation. None of them are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// Single-field shape, length or pattern violation
    Format,
    /// Partially filled guardian sub-record
    Completeness,
    /// National ID does not agree with the birth date
    Correlation,
    /// Guardian required but missing, or present but forbidden
    Eligibility,
}

/// Machine-readable rule identifier attached to every issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    Required,
    TooShort,
    TooLong,
    InvalidCharacters,
    InvalidFormat,
    InvalidDate,
    FutureDate,
    ImplausibleAge,
    GuardianIncomplete,
    NationalIdBirthDateMismatch,
    MinorRequiresGuardian,
    AdultGuardianForbidden,
}

impl IssueCode {
    pub const ALL: [IssueCode; 12] = [
        IssueCode::Required,
        IssueCode::TooShort,
        IssueCode::TooLong,
        IssueCode::InvalidCharacters,
        IssueCode::InvalidFormat,
        IssueCode::InvalidDate,
        IssueCode::FutureDate,
        IssueCode::ImplausibleAge,
        IssueCode::GuardianIncomplete,
        IssueCode::NationalIdBirthDateMismatch,
        IssueCode::MinorRequiresGuardian,
        IssueCode::AdultGuardianForbidden,
    ];

    pub fn category(self) -> IssueCategory {
        match self {
            IssueCode::Required
            | IssueCode::TooShort
            | IssueCode::TooLong
            | IssueCode::InvalidCharacters
            | IssueCode::InvalidFormat
            | IssueCode::InvalidDate
            | IssueCode::FutureDate
            | IssueCode::ImplausibleAge => IssueCategory::Format,
            IssueCode::GuardianIncomplete => IssueCategory::Completeness,
            IssueCode::NationalIdBirthDateMismatch => IssueCategory::Correlation,
            IssueCode::MinorRequiresGuardian | IssueCode::AdultGuardianForbidden => {
                IssueCategory::Eligibility
            }
        }
    }

    /// Wire identifier, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            IssueCode::Required => "required",
            IssueCode::TooShort => "too_short",
            IssueCode::TooLong => "too_long",
            IssueCode::InvalidCharacters => "invalid_characters",
            IssueCode::InvalidFormat => "invalid_format",
            IssueCode::InvalidDate => "invalid_date",
            IssueCode::FutureDate => "future_date",
            IssueCode::ImplausibleAge => "implausible_age",
            IssueCode::GuardianIncomplete => "guardian_incomplete",
            IssueCode::NationalIdBirthDateMismatch => "national_id_birth_date_mismatch",
            IssueCode::MinorRequiresGuardian => "minor_requires_guardian",
            IssueCode::AdultGuardianForbidden => "adult_guardian_forbidden",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueCategory::Format => "format",
            IssueCategory::Completeness => "completeness",
            IssueCategory::Correlation => "correlation",
            IssueCategory::Eligibility => "eligibility",
        };
        f.write_str(name)
    }
}

/// A single field-attributed rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Field locator (see [`paths`])
    pub path: String,
    /// Human-readable explanation
    pub message: String,
    pub code: IssueCode,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            code,
        }
    }

    pub fn category(&self) -> IssueCategory {
        self.code.category()
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.path, self.message, self.code)
    }
}

/// Aggregated outcome of one validation pass.
///
/// Issues keep rule execution order. A record is valid iff there are none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// Any issue blocks persistence.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues attached to exactly `path`, for form bindings.
    pub fn issues_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationIssue> + 'a {
        self.issues.iter().filter(move |issue| issue.path == path)
    }

    pub fn has_code(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }

    pub fn count_code(&self, code: IssueCode) -> usize {
        self.issues.iter().filter(|issue| issue.code == code).count()
    }

    /// Distinct categories present in the report.
    pub fn categories(&self) -> BTreeSet<IssueCategory> {
        self.issues.iter().map(ValidationIssue::category).collect()
    }

    pub(crate) fn extend(&mut self, issues: Vec<ValidationIssue>) {
        self.issues.extend(issues);
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationIssue;
    type IntoIter = std::vec::IntoIter<ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}
