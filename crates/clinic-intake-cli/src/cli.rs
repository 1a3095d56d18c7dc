use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clinic_intake_core::age::parse_birth_date;
use clinic_intake_core::{
    Clock, IssueCode, SystemClock, TracingDiagnostics, ValidationPipeline, ValidationPolicy,
};
use tracing::info;

use crate::batch::{parse_records, read_input, run_batch};
use crate::config::CliConfig;

/// Every record valid.
pub const EXIT_VALID: u8 = 0;
/// At least one record has issues.
pub const EXIT_INVALID: u8 = 1;
/// Input, policy or configuration could not be read.
pub const EXIT_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "clinic-intake",
    about = "Run patient eligibility validation over batches of intake records",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a JSON array or NDJSON file of patient records
    Check(CheckArgs),
    /// List the validation rules and issue codes
    Rules,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Input file, or `-` for stdin
    input: PathBuf,
    /// Validate as of this date (YYYY-MM-DD) instead of today
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,
    /// JSON policy file overriding the default limits
    #[arg(long)]
    policy: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Only list records that have issues
    #[arg(long)]
    only_invalid: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    parse_birth_date(value).ok_or_else(|| format!("'{value}' is not a YYYY-MM-DD date"))
}

pub(crate) fn run(cli: Cli, config: &CliConfig) -> anyhow::Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    let status = match cli.command {
        Command::Check(args) => check(&args, config, &mut stdout)?,
        Command::Rules => {
            stdout.write_all(describe_rules().as_bytes())?;
            EXIT_VALID
        }
    };
    stdout.flush()?;
    Ok(ExitCode::from(status))
}

/// Validate the input named by `args`, write the outcome to `out` and return
/// the exit status. Unreadable input or policy files are errors.
fn check(args: &CheckArgs, config: &CliConfig, out: &mut impl Write) -> anyhow::Result<u8> {
    let policy = match &args.policy {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading policy file {}", path.display()))?;
            ValidationPolicy::from_json(&json)
                .with_context(|| format!("loading policy file {}", path.display()))?
        }
        None => ValidationPolicy::default(),
    };

    let as_of = args
        .as_of
        .or(config.default_as_of)
        .unwrap_or_else(|| SystemClock.today());

    let input = read_input(&args.input)?;
    let records = parse_records(&input)
        .with_context(|| format!("decoding records from {}", args.input.display()))?;

    let pipeline = ValidationPipeline::new(policy).with_diagnostics(TracingDiagnostics);
    info!(
        records = records.len(),
        %as_of,
        adult_age = pipeline.policy().adult_age,
        "validating batch"
    );
    let mut outcome = run_batch(&records, &pipeline, as_of);
    let all_valid = outcome.all_valid();
    if args.only_invalid {
        outcome = outcome.only_invalid();
    }

    match args.format {
        OutputFormat::Json => writeln!(out, "{}", outcome.to_json()?)?,
        OutputFormat::Text => write!(out, "{}", outcome.to_text())?,
    }

    Ok(if all_valid { EXIT_VALID } else { EXIT_INVALID })
}

fn describe_rules() -> String {
    let pipeline = ValidationPipeline::default();
    let mut out = String::from("rules (in execution order):\n");
    for (position, name) in pipeline.rule_names().into_iter().enumerate() {
        out.push_str(&format!("  {}. {name}\n", position + 1));
    }
    out.push_str("issue codes:\n");
    for code in IssueCode::ALL {
        out.push_str(&format!("  {code} ({})\n", code.category()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const VALID_RECORD: &str = r#"{"firstNames":"María José","lastNames":"Pérez López","dateOfBirth":"2004-01-15","nationalId":"001-150104-0002A"}"#;
    /// Turns 18 on 2026-10-19.
    const NEARLY_ADULT: &str = r#"{"firstNames":"Ana","lastNames":"Ruiz","dateOfBirth":"2008-10-19"}"#;

    fn fixture() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/intake_batch.ndjson")
    }

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    fn check_args(input: PathBuf) -> CheckArgs {
        CheckArgs {
            input,
            as_of: NaiveDate::from_ymd_opt(2026, 10, 18),
            policy: None,
            format: OutputFormat::Json,
            only_invalid: false,
        }
    }

    fn config(default_as_of: Option<NaiveDate>) -> CliConfig {
        CliConfig {
            log_level: "warn".into(),
            default_as_of,
        }
    }

    fn run_check(args: &CheckArgs, config: &CliConfig) -> anyhow::Result<(u8, String)> {
        let mut out = Vec::new();
        let status = check(args, config, &mut out)?;
        Ok((status, String::from_utf8(out).unwrap()))
    }

    #[test]
    fn test_parse_check_args() {
        let cli = Cli::try_parse_from([
            "clinic-intake",
            "check",
            "records.ndjson",
            "--as-of",
            "2026-10-18",
            "--format",
            "text",
            "--only-invalid",
        ])
        .unwrap();

        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.input, PathBuf::from("records.ndjson"));
                assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2026, 10, 18));
                assert_eq!(args.format, OutputFormat::Text);
                assert!(args.only_invalid);
                assert!(args.policy.is_none());
            }
            other => panic!("expected check command, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_as_of() {
        let result = Cli::try_parse_from(["clinic-intake", "check", "-", "--as-of", "18/10/2026"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_describe_rules_lists_everything() {
        let text = describe_rules();
        assert!(text.contains("1. field_format"));
        assert!(text.contains("4. age_guardian_eligibility"));
        assert!(text.contains("adult_guardian_forbidden (eligibility)"));
        assert!(text.contains("guardian_incomplete (completeness)"));
    }

    #[test]
    fn test_check_fixture_exits_invalid() {
        let (status, out) = run_check(&check_args(fixture()), &config(None)).unwrap();
        assert_eq!(status, EXIT_INVALID);

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["summary"]["total"], 6);
        assert_eq!(value["summary"]["invalid"], 4);
        assert_eq!(value["summary"]["as_of"], "2026-10-18");
    }

    #[test]
    fn test_check_valid_batch_exits_zero() {
        let file = temp_file(&format!("{VALID_RECORD}\n{VALID_RECORD}\n"));
        let mut args = check_args(file.path().to_path_buf());
        args.format = OutputFormat::Text;

        let (status, out) = run_check(&args, &config(None)).unwrap();
        assert_eq!(status, EXIT_VALID);
        assert!(out.contains("2 valid, 0 invalid"));
    }

    #[test]
    fn test_check_only_invalid_keeps_exit_status() {
        let mut args = check_args(fixture());
        args.only_invalid = true;

        let (status, out) = run_check(&args, &config(None)).unwrap();
        assert_eq!(status, EXIT_INVALID);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["results"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_check_falls_back_to_configured_as_of() {
        let file = temp_file(NEARLY_ADULT);
        let mut args = check_args(file.path().to_path_buf());
        args.as_of = None;

        let day_before = config(NaiveDate::from_ymd_opt(2026, 10, 18));
        assert_eq!(run_check(&args, &day_before).unwrap().0, EXIT_INVALID);

        let birthday = config(NaiveDate::from_ymd_opt(2026, 10, 19));
        assert_eq!(run_check(&args, &birthday).unwrap().0, EXIT_VALID);

        // The flag wins over the environment.
        args.as_of = NaiveDate::from_ymd_opt(2026, 10, 18);
        assert_eq!(run_check(&args, &birthday).unwrap().0, EXIT_INVALID);
    }

    #[test]
    fn test_check_applies_policy_file() {
        let policy = temp_file(r#"{"adult_age": 16}"#);
        let file = temp_file(NEARLY_ADULT);
        let mut args = check_args(file.path().to_path_buf());
        args.policy = Some(policy.path().to_path_buf());

        assert_eq!(run_check(&args, &config(None)).unwrap().0, EXIT_VALID);
    }

    #[test]
    fn test_check_rejects_invalid_policy_file() {
        let policy = temp_file(r#"{"adult_age": 0}"#);
        let mut args = check_args(fixture());
        args.policy = Some(policy.path().to_path_buf());

        let err = run_check(&args, &config(None)).unwrap_err();
        assert!(format!("{err:#}").contains("loading policy file"));
    }

    #[test]
    fn test_check_rejects_broken_ndjson_line() {
        let file = temp_file(&format!("{VALID_RECORD}\n{{\"firstNames\":\n"));
        let err = run_check(&check_args(file.path().to_path_buf()), &config(None)).unwrap_err();
        assert!(format!("{err:#}").contains("Line 2"));
    }

    #[test]
    fn test_check_missing_input_is_an_error() {
        let args = check_args(PathBuf::from("/nonexistent/intake.ndjson"));
        assert!(run_check(&args, &config(None)).is_err());
    }
}
