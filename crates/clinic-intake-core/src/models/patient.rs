//! Patient intake records.

use serde::{Deserialize, Serialize};

/// A patient record as submitted by the intake form.
///
/// Every scalar is kept as the raw string the form produced; an empty string
/// means "unset".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientRecord {
    /// Given names
    pub first_names: String,
    /// Surnames
    pub last_names: String,
    /// Birth date, canonical `YYYY-MM-DD`
    pub date_of_birth: String,
    /// National identity document (`NNN-DDMMYY-NNNNA`)
    pub national_id: String,
    /// Eight digit phone number
    pub contact_phone: String,
    pub contact_email: String,
    pub address: String,
    pub allergies: String,
    pub medical_history: String,
    pub current_medications: String,
    /// Responsible adult; `None` is equivalent to every field empty
    pub guardian: Option<GuardianRecord>,
}

impl PatientRecord {
    /// Create a record with the required identity fields filled in.
    pub fn new(
        first_names: impl Into<String>,
        last_names: impl Into<String>,
        date_of_birth: impl Into<String>,
    ) -> Self {
        Self {
            first_names: first_names.into(),
            last_names: last_names.into(),
            date_of_birth: date_of_birth.into(),
            ..Self::default()
        }
    }

    /// Builder-style setter for the national ID.
    pub fn with_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.national_id = national_id.into();
        self
    }

    /// Builder-style setter for the guardian sub-record.
    pub fn with_guardian(mut self, guardian: GuardianRecord) -> Self {
        self.guardian = Some(guardian);
        self
    }
}

/// Guardian sub-record. Valid only when fully populated or fully empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GuardianRecord {
    pub full_name: String,
    pub national_id: String,
    /// Relationship to the patient (e.g. "madre", "tutor legal")
    pub relationship: String,
    pub contact_phone: String,
}

impl GuardianRecord {
    pub fn new(
        full_name: impl Into<String>,
        national_id: impl Into<String>,
        relationship: impl Into<String>,
        contact_phone: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            national_id: national_id.into(),
            relationship: relationship.into(),
            contact_phone: contact_phone.into(),
        }
    }

    /// The four fields in declaration order, trimmed.
    pub fn trimmed_fields(&self) -> [&str; 4] {
        [
            self.full_name.trim(),
            self.national_id.trim(),
            self.relationship.trim(),
            self.contact_phone.trim(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient() {
        let patient = PatientRecord::new("María José", "Pérez López", "2004-01-15");
        assert_eq!(patient.first_names, "María José");
        assert!(patient.national_id.is_empty());
        assert!(patient.guardian.is_none());
    }

    #[test]
    fn test_deserialize_camel_case_with_missing_fields() {
        let json = r#"{"firstNames":"Ana","lastNames":"Ruiz","dateOfBirth":"2000-02-02","guardian":{"fullName":"Luis Ruiz"}}"#;
        let patient: PatientRecord = serde_json::from_str(json).unwrap();

        assert_eq!(patient.date_of_birth, "2000-02-02");
        assert_eq!(patient.contact_phone, "");
        let guardian = patient.guardian.unwrap();
        assert_eq!(guardian.full_name, "Luis Ruiz");
        assert_eq!(guardian.relationship, "");
    }

    #[test]
    fn test_guardian_trimmed_fields() {
        let guardian = GuardianRecord::new(" Luis ", "", "  padre", "88887777 ");
        assert_eq!(guardian.trimmed_fields(), ["Luis", "", "padre", "88887777"]);
    }
}
