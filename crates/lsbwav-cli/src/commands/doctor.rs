//! Doctor command implementation
//!
//! Checks system dependencies and configuration.

use anyhow::Result;
use colored::Colorize;
use lsbwav_core::{StegoError, Transcoder};
use std::env;
use std::process::ExitCode;

use crate::config::StegoConfig;

/// Run the doctor command
///
/// Checks:
/// - Version information
/// - ffmpeg availability (needed only for MP3/FLAC inputs)
/// - Current directory permissions
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if any fail
pub fn run(config: &StegoConfig) -> Result<ExitCode> {
    println!("{}", "lsbwav Doctor".cyan().bold());
    println!("{}", "=============".cyan());
    println!();

    let mut all_ok = true;

    println!("{}", "Versions:".bold());
    println!("  {} lsbwav-cli v{}", "->".green(), env!("CARGO_PKG_VERSION"));
    println!();

    println!("{}", "Dependencies:".bold());
    let transcoder = Transcoder::with_config(config.transcoder_config());
    match check_ffmpeg(&transcoder) {
        FfmpegStatus::Found { path, version } => {
            println!(
                "  {} ffmpeg {} ({})",
                "ok".green(),
                version,
                path.as_str().dimmed()
            );
        }
        FfmpegStatus::NotFound => {
            println!("  {} ffmpeg not found", "!!".yellow());
            println!(
                "     {}",
                "ffmpeg is required only for MP3 and FLAC inputs.".dimmed()
            );
            println!(
                "     {}",
                "Install it, set FFMPEG_PATH, or set ffmpeg_path in the config file.".dimmed()
            );
            // WAV-only use still works
        }
        FfmpegStatus::Error(e) => {
            println!("  {} ffmpeg check failed: {}", "!!".red(), e);
            all_ok = false;
        }
    }
    println!();

    println!("{}", "Permissions:".bold());
    match env::current_dir() {
        Ok(dir) => {
            let test_file = dir.join(".lsbwav_write_test");
            match std::fs::write(&test_file, "test") {
                Ok(_) => {
                    let _ = std::fs::remove_file(&test_file);
                    println!(
                        "  {} Current directory is writable ({})",
                        "ok".green(),
                        dir.display()
                    );
                }
                Err(e) => {
                    println!("  {} Cannot write to current directory: {}", "!!".red(), e);
                    all_ok = false;
                }
            }
        }
        Err(e) => {
            println!("  {} Cannot determine current directory: {}", "!!".red(), e);
            all_ok = false;
        }
    }
    println!();

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}

/// Status of the ffmpeg check
enum FfmpegStatus {
    Found { path: String, version: String },
    NotFound,
    Error(String),
}

fn check_ffmpeg(transcoder: &Transcoder) -> FfmpegStatus {
    let path = match transcoder.locate() {
        Ok(path) => path.display().to_string(),
        Err(_) => return FfmpegStatus::NotFound,
    };

    match transcoder.version() {
        Ok(line) => FfmpegStatus::Found {
            path,
            version: parse_ffmpeg_version(&line).unwrap_or_else(|| "unknown".to_string()),
        },
        Err(StegoError::TranscoderNotFound) => FfmpegStatus::NotFound,
        Err(e) => FfmpegStatus::Error(e.to_string()),
    }
}

fn parse_ffmpeg_version(line: &str) -> Option<String> {
    // "ffmpeg version 6.1.1-3ubuntu5 Copyright (c) ..."
    line.strip_prefix("ffmpeg version ")
        .and_then(|rest| rest.split_whitespace().next())
        .map(|v| v.to_string())
}
