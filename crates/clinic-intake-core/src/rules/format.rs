//! Per-field shape, length and character-class checks.

use std::sync::OnceLock;

use regex::Regex;

use super::RuleContext;
use crate::age::compute_age;
use crate::identity;
use crate::models::{paths, GuardianRecord, IssueCode, PatientRecord, ValidationIssue};
use crate::policy::LengthBounds;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Words of letters (any script, combining marks allowed) separated by single spaces.
    PATTERN.get_or_init(|| Regex::new(r"^[\p{L}\p{M}]+(?: [\p{L}\p{M}]+)*$").expect("static regex"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{8}$").expect("static regex"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
            .expect("static regex")
    })
}

/// Format checks for every scalar field, patient first, then guardian.
pub fn field_format(record: &PatientRecord, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
    let policy = ctx.policy;
    let mut issues = Vec::new();

    check_name(&mut issues, paths::FIRST_NAMES, &record.first_names, policy.patient_name, true);
    check_name(&mut issues, paths::LAST_NAMES, &record.last_names, policy.patient_name, true);
    check_date_of_birth(&mut issues, record, ctx);

    let national_id = record.national_id.trim();
    if !national_id.is_empty() && !identity::is_well_formed(national_id) {
        issues.push(ValidationIssue::new(
            paths::NATIONAL_ID,
            IssueCode::InvalidFormat,
            "national ID must follow the format 000-000000-0000A",
        ));
    }

    check_phone(&mut issues, paths::CONTACT_PHONE, &record.contact_phone);
    check_email(&mut issues, &record.contact_email, policy.contact_email);

    check_text(&mut issues, paths::ADDRESS, &record.address, policy.address);
    check_text(&mut issues, paths::ALLERGIES, &record.allergies, policy.medical_text);
    check_text(&mut issues, paths::MEDICAL_HISTORY, &record.medical_history, policy.medical_text);
    check_text(
        &mut issues,
        paths::CURRENT_MEDICATIONS,
        &record.current_medications,
        policy.medical_text,
    );

    if let Some(guardian) = &record.guardian {
        check_guardian(&mut issues, guardian, ctx);
    }

    issues
}

/// Guardian fields are validated only when filled; completeness is a separate rule.
fn check_guardian(issues: &mut Vec<ValidationIssue>, guardian: &GuardianRecord, ctx: &RuleContext<'_>) {
    let policy = ctx.policy;

    check_name(
        issues,
        paths::GUARDIAN_FULL_NAME,
        &guardian.full_name,
        policy.guardian_full_name,
        false,
    );
    // The guardian's document is not held to the patient ID layout.
    check_text(
        issues,
        paths::GUARDIAN_NATIONAL_ID,
        &guardian.national_id,
        policy.guardian_national_id,
    );
    check_name(
        issues,
        paths::GUARDIAN_RELATIONSHIP,
        &guardian.relationship,
        policy.guardian_relationship,
        false,
    );
    check_phone(issues, paths::GUARDIAN_CONTACT_PHONE, &guardian.contact_phone);
}

fn check_name(
    issues: &mut Vec<ValidationIssue>,
    path: &'static str,
    value: &str,
    bounds: LengthBounds,
    required: bool,
) {
    let value = value.trim();
    if value.is_empty() {
        if required {
            issues.push(ValidationIssue::new(path, IssueCode::Required, "this field is required"));
        }
        return;
    }

    check_bounds(issues, path, value, bounds);
    if !name_pattern().is_match(value) {
        issues.push(ValidationIssue::new(
            path,
            IssueCode::InvalidCharacters,
            "only letters and single spaces are allowed",
        ));
    }
}

fn check_date_of_birth(issues: &mut Vec<ValidationIssue>, record: &PatientRecord, ctx: &RuleContext<'_>) {
    if record.date_of_birth.trim().is_empty() {
        issues.push(ValidationIssue::new(
            paths::DATE_OF_BIRTH,
            IssueCode::Required,
            "date of birth is required",
        ));
        return;
    }

    let Some(birth) = ctx.birth_date else {
        issues.push(ValidationIssue::new(
            paths::DATE_OF_BIRTH,
            IssueCode::InvalidDate,
            "date of birth must be a valid date in YYYY-MM-DD format",
        ));
        return;
    };

    if birth > ctx.as_of {
        issues.push(ValidationIssue::new(
            paths::DATE_OF_BIRTH,
            IssueCode::FutureDate,
            "date of birth cannot be in the future",
        ));
        return;
    }

    let max_age = ctx.policy.max_age;
    if compute_age(birth, ctx.as_of) > i32::try_from(max_age).unwrap_or(i32::MAX) {
        issues.push(ValidationIssue::new(
            paths::DATE_OF_BIRTH,
            IssueCode::ImplausibleAge,
            format!("date of birth implies an age over {max_age} years"),
        ));
    }
}

fn check_phone(issues: &mut Vec<ValidationIssue>, path: &'static str, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !phone_pattern().is_match(value) {
        issues.push(ValidationIssue::new(
            path,
            IssueCode::InvalidFormat,
            "phone number must contain exactly 8 digits",
        ));
    }
}

fn check_email(issues: &mut Vec<ValidationIssue>, value: &str, bounds: LengthBounds) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    check_bounds(issues, paths::CONTACT_EMAIL, value, bounds);
    if !email_pattern().is_match(value) {
        issues.push(ValidationIssue::new(
            paths::CONTACT_EMAIL,
            IssueCode::InvalidFormat,
            "email address is not valid",
        ));
    }
}

/// Free text: length only.
fn check_text(issues: &mut Vec<ValidationIssue>, path: &'static str, value: &str, bounds: LengthBounds) {
    let value = value.trim();
    if !value.is_empty() {
        check_bounds(issues, path, value, bounds);
    }
}

fn check_bounds(issues: &mut Vec<ValidationIssue>, path: &'static str, value: &str, bounds: LengthBounds) {
    let len = value.chars().count();
    if len < bounds.min {
        issues.push(ValidationIssue::new(
            path,
            IssueCode::TooShort,
            format!("must be at least {} characters", bounds.min),
        ));
    } else if len > bounds.max {
        issues.push(ValidationIssue::new(
            path,
            IssueCode::TooLong,
            format!("must be at most {} characters", bounds.max),
        ));
    }
}
