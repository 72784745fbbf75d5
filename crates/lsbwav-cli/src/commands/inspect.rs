//! Inspect command implementation
//!
//! Prints format metadata and a content hash for an audio file.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{input_error_to_json, InspectOutput, InspectResult, JsonError};
use super::reporting::{display_path, print_error, print_json};
use crate::config::StegoConfig;
use crate::input::load_audio;

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(input: &str, config: &StegoConfig, json_output: bool) -> Result<ExitCode> {
    let outcome = inspect(Path::new(input), config);

    if json_output {
        return match outcome {
            Ok(result) => print_json(&InspectOutput::success(result), true),
            Err(error) => print_json(&InspectOutput::failure(vec![error]), false),
        };
    }

    match outcome {
        Ok(result) => {
            println!("{}", "Audio file".cyan().bold());
            println!("  {} {}", "Path:".dimmed(), result.input);
            println!("  {} {}", "Source:".dimmed(), result.source_kind);
            println!("  {} {} bytes", "Size:".dimmed(), result.file_bytes);
            println!("  {} {}", "Channels:".dimmed(), result.format.channels);
            println!("  {} {} Hz", "Sample rate:".dimmed(), result.format.sample_rate);
            println!("  {} {}", "Bit depth:".dimmed(), result.format.bits_per_sample);
            println!(
                "  {} {} ({:.3} s)",
                "Frames:".dimmed(),
                result.frames,
                result.duration_seconds
            );
            println!("  {} {}", "PCM hash:".dimmed(), short_hash(&result.pcm_hash));
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => Ok(print_error(&error)),
    }
}

/// Load `input` and describe it.
pub fn inspect(input: &Path, config: &StegoConfig) -> Result<InspectResult, JsonError> {
    let input_display = display_path(input);
    let loaded = load_audio(input, config)
        .map_err(|e| input_error_to_json(&e, Some(input_display.as_str())))?;
    let waveform = &loaded.waveform;

    Ok(InspectResult {
        input: input_display,
        source_kind: loaded.source_kind,
        file_bytes: loaded.file_bytes,
        format: waveform.format().into(),
        frames: waveform.frame_count(),
        duration_seconds: waveform.duration_seconds(),
        pcm_hash: waveform.pcm_hash(),
    })
}

/// First 16 hex digits of a hash, or the whole string if shorter.
fn short_hash(hash: &str) -> &str {
    hash.get(..16).unwrap_or(hash)
}
