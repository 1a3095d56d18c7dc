//! Validation pipeline.
//!
//! Runs every rule in a fixed order against one record and unions the issues.
//! No rule is skipped because another one failed.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::diagnostics::{DiagnosticHook, NoopDiagnostics};
use crate::models::{PatientRecord, ValidationReport};
use crate::policy::ValidationPolicy;
use crate::rules::{RuleContext, RULES};

/// Stateless rule runner; safe to share across threads.
#[derive(Clone)]
pub struct ValidationPipeline {
    policy: ValidationPolicy,
    diagnostics: Arc<dyn DiagnosticHook>,
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::new(ValidationPolicy::default())
    }
}

impl std::fmt::Debug for ValidationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationPipeline")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ValidationPipeline {
    /// Create a pipeline with the given policy and no diagnostics.
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            policy,
            diagnostics: Arc::new(NoopDiagnostics),
        }
    }

    /// Attach a diagnostic hook, called once per rule.
    pub fn with_diagnostics(mut self, hook: impl DiagnosticHook + 'static) -> Self {
        self.diagnostics = Arc::new(hook);
        self
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Rule identifiers in execution order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        RULES.iter().map(|rule| rule.name).collect()
    }

    /// Validate against the clock's current date. The clock is read once.
    pub fn validate(&self, record: &PatientRecord, clock: &dyn Clock) -> ValidationReport {
        self.validate_as_of(record, clock.today())
    }

    /// Validate as if today were `as_of`.
    pub fn validate_as_of(&self, record: &PatientRecord, as_of: NaiveDate) -> ValidationReport {
        let ctx = RuleContext::derive(record, as_of, &self.policy);

        let mut report = ValidationReport::default();
        for rule in RULES.iter() {
            let issues = (rule.evaluate)(record, &ctx);
            self.diagnostics.rule_evaluated(rule.name, &issues);
            report.extend(issues);
        }
        report
    }
}

/// Validate with the default policy.
pub fn validate_patient(record: &PatientRecord, as_of: NaiveDate) -> ValidationReport {
    ValidationPipeline::default().validate_as_of(record, as_of)
}
