//! Tunable limits applied by the field and eligibility rules.
//!
//! Patterns (national ID layout, 8-digit phones) are fixed external contracts
//! and are not configurable here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Policy errors.
#[derive(Error, Debug, PartialEq)]
pub enum PolicyError {
    #[error("Invalid length bounds for {field}: min {min} exceeds max {max}")]
    InvalidBounds {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("Age of majority must be greater than zero")]
    ZeroAdultAge,

    #[error("Maximum plausible age {max_age} must exceed age of majority {adult_age}")]
    MaxAgeBelowAdultAge { max_age: u32, adult_age: u32 },

    #[error("Maximum plausible age {max_age} exceeds the supported limit of 200")]
    MaxAgeTooLarge { max_age: u32 },
}

/// Upper limit for `max_age`, and therefore for `adult_age`.
pub const MAX_SUPPORTED_AGE: u32 = 200;

pub type PolicyResult<T> = Result<T, PolicyError>;

/// Inclusive character-count bounds on a trimmed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub const fn at_most(max: usize) -> Self {
        Self { min: 0, max }
    }
}

/// Limits used by the validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Age at which a patient counts as an adult
    pub adult_age: u32,
    /// Ages above this are reported as implausible birth dates
    pub max_age: u32,
    pub patient_name: LengthBounds,
    pub contact_email: LengthBounds,
    pub address: LengthBounds,
    /// Allergies, medical history and current medications
    pub medical_text: LengthBounds,
    pub guardian_full_name: LengthBounds,
    pub guardian_national_id: LengthBounds,
    pub guardian_relationship: LengthBounds,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            adult_age: 18,
            max_age: 120,
            patient_name: LengthBounds::new(2, 50),
            contact_email: LengthBounds::at_most(100),
            address: LengthBounds::at_most(200),
            medical_text: LengthBounds::at_most(500),
            guardian_full_name: LengthBounds::new(2, 100),
            guardian_national_id: LengthBounds::at_most(16),
            guardian_relationship: LengthBounds::new(2, 30),
        }
    }
}

impl ValidationPolicy {
    /// Check internal consistency; returns the policy unchanged when sound.
    pub fn validated(self) -> PolicyResult<Self> {
        if self.adult_age == 0 {
            return Err(PolicyError::ZeroAdultAge);
        }
        if self.max_age <= self.adult_age {
            return Err(PolicyError::MaxAgeBelowAdultAge {
                max_age: self.max_age,
                adult_age: self.adult_age,
            });
        }
        if self.max_age > MAX_SUPPORTED_AGE {
            return Err(PolicyError::MaxAgeTooLarge {
                max_age: self.max_age,
            });
        }

        let bounds = [
            ("patient_name", self.patient_name),
            ("contact_email", self.contact_email),
            ("address", self.address),
            ("medical_text", self.medical_text),
            ("guardian_full_name", self.guardian_full_name),
            ("guardian_national_id", self.guardian_national_id),
            ("guardian_relationship", self.guardian_relationship),
        ];
        for (field, LengthBounds { min, max }) in bounds {
            if min > max {
                return Err(PolicyError::InvalidBounds { field, min, max });
            }
        }

        Ok(self)
    }

    /// Parse and check a policy from JSON. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, PolicyLoadError> {
        let policy: ValidationPolicy = serde_json::from_str(json)?;
        Ok(policy.validated()?)
    }
}

/// Failure loading a policy document.
#[derive(Error, Debug)]
pub enum PolicyLoadError {
    #[error("Policy JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] PolicyError),
}
