//! Batch validation of record files.
//!
//! Input is either a JSON array of records or newline-delimited JSON, decided
//! by the first non-whitespace character.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use clinic_intake_core::{IssueCode, PatientRecord, ValidationIssue, ValidationPipeline};
use serde::Serialize;
use thiserror::Error;

/// Batch input errors.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error reading {source_name}: {source}")]
    Io {
        source_name: String,
        source: std::io::Error,
    },

    #[error("JSON array parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        source: serde_json::Error,
    },
}

pub type BatchResult<T> = Result<T, BatchError>;

/// Read the whole input; `-` means stdin.
pub fn read_input(path: &Path) -> BatchResult<String> {
    let mut buffer = String::new();
    let result = if path.as_os_str() == "-" {
        std::io::stdin().read_to_string(&mut buffer).map(|_| ())
    } else {
        std::fs::File::open(path).and_then(|mut file| file.read_to_string(&mut buffer).map(|_| ()))
    };

    result.map_err(|source| BatchError::Io {
        source_name: path.display().to_string(),
        source,
    })?;
    Ok(buffer)
}

/// Decode records from a JSON array or NDJSON.
pub fn parse_records(input: &str) -> BatchResult<Vec<PatientRecord>> {
    if input.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(input)?);
    }

    let mut records = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(line).map_err(|source| BatchError::Line {
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Outcome for one input record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordResult {
    /// Zero-based position in the input
    pub index: usize,
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

/// Totals over the whole batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub as_of: String,
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub issue_counts: BTreeMap<IssueCode, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub results: Vec<RecordResult>,
    pub summary: BatchSummary,
}

impl BatchOutcome {
    pub fn all_valid(&self) -> bool {
        self.summary.invalid == 0
    }

    /// Drop valid records from the per-record listing; the summary is kept.
    pub fn only_invalid(mut self) -> Self {
        self.results.retain(|result| !result.valid);
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for result in &self.results {
            if result.valid {
                let _ = writeln!(out, "record {}: valid", result.index);
                continue;
            }
            let _ = writeln!(out, "record {}: {} issue(s)", result.index, result.issues.len());
            for issue in &result.issues {
                let _ = writeln!(out, "  - {issue}");
            }
        }

        let summary = &self.summary;
        let _ = writeln!(
            out,
            "checked {} record(s) as of {}: {} valid, {} invalid",
            summary.total, summary.as_of, summary.valid, summary.invalid
        );
        for (code, count) in &summary.issue_counts {
            let _ = writeln!(out, "  {code}: {count}");
        }
        out
    }
}

/// Validate every record against the same as-of date.
pub fn run_batch(
    records: &[PatientRecord],
    pipeline: &ValidationPipeline,
    as_of: NaiveDate,
) -> BatchOutcome {
    let mut summary = BatchSummary {
        as_of: as_of.format("%Y-%m-%d").to_string(),
        ..BatchSummary::default()
    };

    let results: Vec<RecordResult> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let report = pipeline.validate_as_of(record, as_of);
            let valid = report.is_valid();
            if !valid {
                tracing::debug!(index, issue_count = report.len(), "record rejected");
            }

            summary.total += 1;
            if valid {
                summary.valid += 1;
            } else {
                summary.invalid += 1;
            }
            for issue in report.issues() {
                *summary.issue_counts.entry(issue.code).or_insert(0) += 1;
            }

            RecordResult {
                index,
                valid,
                issues: report.into_issues(),
            }
        })
        .collect();

    tracing::info!(
        total = summary.total,
        invalid = summary.invalid,
        "batch validation finished"
    );

    BatchOutcome { results, summary }
}
