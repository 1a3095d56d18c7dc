//! Observation hook called by the pipeline after each rule.
//!
//! Hooks see rule names and the issues produced, never the record itself, and
//! cannot change the outcome of a validation pass.

use crate::models::ValidationIssue;

pub trait DiagnosticHook: Send + Sync {
    fn rule_evaluated(&self, rule: &'static str, issues: &[ValidationIssue]);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl DiagnosticHook for NoopDiagnostics {
    fn rule_evaluated(&self, _rule: &'static str, _issues: &[ValidationIssue]) {}
}

/// Emits one `debug` event per rule with the codes it raised.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticHook for TracingDiagnostics {
    fn rule_evaluated(&self, rule: &'static str, issues: &[ValidationIssue]) {
        let codes: Vec<&'static str> = issues.iter().map(|issue| issue.code.as_str()).collect();
        tracing::debug!(rule, issue_count = issues.len(), ?codes, "validation rule evaluated");
    }
}
