//! Capacity command implementation
//!
//! Reports how large a message a cover file can carry.

use anyhow::Result;
use colored::Colorize;
use lsbwav_core::codec::{capacity_bits, max_message_len, HEADER_BITS};
use lsbwav_core::EmbedOptions;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    input_error_to_json, stego_error_to_json, CapacityOutput, CapacityResult, JsonError,
};
use super::reporting::{display_path, print_error, print_json};
use crate::config::StegoConfig;
use crate::input::load_audio;

/// Run the capacity command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input: &str,
    lsb_depth: Option<u8>,
    config: &StegoConfig,
    json_output: bool,
) -> Result<ExitCode> {
    let options = config.embed_options(lsb_depth);
    let outcome = measure(Path::new(input), &options, config);

    if json_output {
        return match outcome {
            Ok(result) => print_json(&CapacityOutput::success(result), true),
            Err(error) => print_json(&CapacityOutput::failure(vec![error]), false),
        };
    }

    match outcome {
        Ok(result) => {
            println!("{}", "Capacity".cyan().bold());
            println!("  {} {} ({})", "Input:".dimmed(), result.input, result.source_kind);
            println!("  {} {}", "Samples:".dimmed(), result.sample_count);
            println!(
                "  {} {} bits at depth {} ({} reserved for the header)",
                "Capacity:".dimmed(),
                result.capacity_bits,
                result.lsb_depth,
                result.header_bits
            );
            println!(
                "  {} {} bytes",
                "Max message:".dimmed(),
                result.max_message_bytes.to_string().green().bold()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => Ok(print_error(&error)),
    }
}

/// Load `input` and compute its capacity at the given depth.
pub fn measure(
    input: &Path,
    options: &EmbedOptions,
    config: &StegoConfig,
) -> Result<CapacityResult, JsonError> {
    let input_display = display_path(input);
    let loaded = load_audio(input, config)
        .map_err(|e| input_error_to_json(&e, Some(input_display.as_str())))?;
    let waveform = &loaded.waveform;

    let capacity = capacity_bits(waveform, options).map_err(|e| stego_error_to_json(&e))?;
    let max_message_bytes =
        max_message_len(waveform, options).map_err(|e| stego_error_to_json(&e))?;

    Ok(CapacityResult {
        input: input_display,
        source_kind: loaded.source_kind,
        lsb_depth: options.lsb_depth,
        sample_count: waveform.sample_count(),
        capacity_bits: capacity,
        header_bits: HEADER_BITS,
        max_message_bytes,
    })
}
