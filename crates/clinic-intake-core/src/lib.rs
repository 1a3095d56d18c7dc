//! Clinic Intake Core Library
//!
//! Patient eligibility validation for clinic intake records.
//!
//! # Architecture
//!
//! ```text
//!   PatientRecord (+ optional GuardianRecord)        Clock
//!                 │                                    │ read once
//!                 ▼                                    ▼
//!        ┌───────────────────────────────────────────────────┐
//!        │ RuleContext: birth date, age, national ID,        │
//!        │              guardian presence (absent/complete/  │
//!        │              partial)                             │
//!        └─────────────────────────┬─────────────────────────┘
//!                                  │
//!       ┌──────────────┬───────────┴──────────┬────────────────────┐
//!       ▼              ▼                      ▼                    ▼
//!  field_format   guardian_completeness  identity_date_     age_guardian_
//!                                         correlation        eligibility
//!       │              │                      │                    │
//!       └──────────────┴──────────┬───────────┴────────────────────┘
//!                                 ▼
//!                    ValidationReport (issue union)
//! ```
//!
//! # Core Principle
//!
//! **Any issue blocks persistence.** The engine only reports; callers decide
//! what to do with the report, but the convention is that a non-empty issue list
//! means the record is not saved.
//!
//! # Modules
//!
//! - [`models`]: Domain types (PatientRecord, GuardianRecord, ValidationIssue, etc.)
//! - [`rules`]: The independent rule functions
//! - [`pipeline`]: Rule runner and report aggregation
//! - [`identity`]: National ID layout and birth segment
//! - [`age`]: Birth date parsing and age computation
//! - [`policy`]: Length limits and age of majority

pub mod age;
pub mod clock;
pub mod diagnostics;
pub mod identity;
pub mod models;
pub mod pipeline;
pub mod policy;
pub mod rules;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use diagnostics::{DiagnosticHook, NoopDiagnostics, TracingDiagnostics};
pub use models::{
    paths, GuardianRecord, IssueCategory, IssueCode, PatientRecord, ValidationIssue,
    ValidationReport,
};
pub use pipeline::{validate_patient, ValidationPipeline};
pub use policy::{LengthBounds, PolicyError, ValidationPolicy, MAX_SUPPORTED_AGE};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use chrono::NaiveDate;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicIntakeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ClinicIntakeError {
    fn from(e: serde_json::Error) -> Self {
        ClinicIntakeError::SerializationError(e.to_string())
    }
}

/// Resolve the optional `YYYY-MM-DD` override, falling back to the system clock.
fn resolve_as_of(as_of: Option<String>) -> Result<NaiveDate, ClinicIntakeError> {
    match as_of {
        None => Ok(SystemClock.today()),
        Some(value) => age::parse_birth_date(&value).ok_or_else(|| {
            ClinicIntakeError::InvalidInput(format!("as_of must be YYYY-MM-DD, got '{value}'"))
        }),
    }
}

// =========================================================================
// Validation Functions (exported to FFI)
// =========================================================================

/// Validate a patient record, returning every issue found.
///
/// `as_of` overrides today's date (`YYYY-MM-DD`); pass `None` for the device clock.
#[uniffi::export]
pub fn validate_patient_record(
    record: FfiPatientRecord,
    as_of: Option<String>,
) -> Result<Vec<FfiValidationIssue>, ClinicIntakeError> {
    let as_of = resolve_as_of(as_of)?;
    let record: PatientRecord = record.into();
    let report = validate_patient(&record, as_of);
    Ok(report.into_iter().map(|issue| issue.into()).collect())
}

/// Validate a camelCase JSON patient record and return the issues as JSON.
#[uniffi::export]
pub fn validate_patient_json(
    json: String,
    as_of: Option<String>,
) -> Result<String, ClinicIntakeError> {
    let as_of = resolve_as_of(as_of)?;
    let record: PatientRecord = serde_json::from_str(&json)?;
    let report = validate_patient(&record, as_of);
    Ok(serde_json::to_string(report.issues())?)
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientRecord {
    pub first_names: String,
    pub last_names: String,
    pub date_of_birth: String,
    pub national_id: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub address: String,
    pub allergies: String,
    pub medical_history: String,
    pub current_medications: String,
    pub guardian: Option<FfiGuardianRecord>,
}

impl From<FfiPatientRecord> for PatientRecord {
    fn from(record: FfiPatientRecord) -> Self {
        PatientRecord {
            first_names: record.first_names,
            last_names: record.last_names,
            date_of_birth: record.date_of_birth,
            national_id: record.national_id,
            contact_phone: record.contact_phone,
            contact_email: record.contact_email,
            address: record.address,
            allergies: record.allergies,
            medical_history: record.medical_history,
            current_medications: record.current_medications,
            guardian: record.guardian.map(|g| g.into()),
        }
    }
}

/// FFI-safe guardian sub-record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiGuardianRecord {
    pub full_name: String,
    pub national_id: String,
    pub relationship: String,
    pub contact_phone: String,
}

impl From<FfiGuardianRecord> for GuardianRecord {
    fn from(guardian: FfiGuardianRecord) -> Self {
        GuardianRecord {
            full_name: guardian.full_name,
            national_id: guardian.national_id,
            relationship: guardian.relationship,
            contact_phone: guardian.contact_phone,
        }
    }
}

/// FFI-safe validation issue.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiValidationIssue {
    pub path: String,
    pub message: String,
    pub code: String,
    pub category: String,
}

impl From<ValidationIssue> for FfiValidationIssue {
    fn from(issue: ValidationIssue) -> Self {
        Self {
            category: issue.category().to_string(),
            code: issue.code.as_str().to_string(),
            path: issue.path,
            message: issue.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ffi_record(date_of_birth: &str) -> FfiPatientRecord {
        FfiPatientRecord {
            first_names: "Ana".into(),
            last_names: "Ruiz".into(),
            date_of_birth: date_of_birth.into(),
            national_id: String::new(),
            contact_phone: String::new(),
            contact_email: String::new(),
            address: String::new(),
            allergies: String::new(),
            medical_history: String::new(),
            current_medications: String::new(),
            guardian: None,
        }
    }

    #[test]
    fn test_validate_patient_record_minor() {
        let issues =
            validate_patient_record(ffi_record("2010-01-01"), Some("2026-10-18".into())).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "guardian");
        assert_eq!(issues[0].code, "minor_requires_guardian");
        assert_eq!(issues[0].category, "eligibility");
    }

    #[test]
    fn test_validate_patient_record_rejects_bad_as_of() {
        let err = validate_patient_record(ffi_record("1990-01-01"), Some("18/10/2026".into()))
            .unwrap_err();
        assert!(matches!(err, ClinicIntakeError::InvalidInput(_)));
    }

    #[test]
    fn test_validate_patient_json() {
        let json = r#"{"firstNames":"Ana","lastNames":"Ruiz","dateOfBirth":"1990-03-20","nationalId":"001-150104-0002A"}"#;
        let out = validate_patient_json(json.into(), Some("2026-10-18".into())).unwrap();
        let issues: Vec<ValidationIssue> = serde_json::from_str(&out).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::NationalIdBirthDateMismatch);
        assert_eq!(issues[0].path, paths::NATIONAL_ID);
    }

    #[test]
    fn test_validate_patient_json_rejects_garbage() {
        let err = validate_patient_json("not json".into(), None).unwrap_err();
        assert!(matches!(err, ClinicIntakeError::SerializationError(_)));
    }
}
