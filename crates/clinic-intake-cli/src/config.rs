//! Environment configuration for batch runs.

use std::env;

use chrono::NaiveDate;
use clinic_intake_core::age::parse_birth_date;
use thiserror::Error;

const LOG_LEVEL_VAR: &str = "CLINIC_INTAKE_LOG_LEVEL";
const AS_OF_VAR: &str = "CLINIC_INTAKE_AS_OF";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("CLINIC_INTAKE_AS_OF must be a YYYY-MM-DD date, got '{0}'")]
    InvalidAsOf(String),
}

/// Settings read from the environment (and `.env`, when present).
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Date used when `--as-of` is not given; `None` means today
    pub default_as_of: Option<NaiveDate>,
}

impl CliConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_level = lookup(LOG_LEVEL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "warn".to_string());

        let default_as_of = match lookup(AS_OF_VAR).filter(|value| !value.trim().is_empty()) {
            Some(value) => Some(parse_birth_date(&value).ok_or(ConfigError::InvalidAsOf(value))?),
            None => None,
        };

        Ok(Self {
            log_level,
            default_as_of,
        })
    }
}
