use std::process::ExitCode;

use clinic_intake_cli::{run, EXIT_ERROR};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("clinic-intake error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
