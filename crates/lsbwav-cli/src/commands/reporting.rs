use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::JsonError;

/// Print a JSON document to stdout and map `success` to an exit code.
pub(crate) fn print_json<T: Serialize>(output: &T, success: bool) -> Result<ExitCode> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize JSON output")?;
    println!("{}", json);
    Ok(exit_code(success))
}

/// Print an error for humans to stderr and return the failure exit code.
pub(crate) fn print_error(error: &JsonError) -> ExitCode {
    eprintln!("{} {}", "error:".red().bold(), error.message);
    if let Some(ref suggestion) = error.suggestion {
        eprintln!("       {}", suggestion.dimmed());
    }
    ExitCode::from(1)
}

pub(crate) fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

pub(crate) fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
