//! Encode command implementation
//!
//! Hides a message in a cover audio file and writes the result as PCM WAV.

use anyhow::Result;
use colored::Colorize;
use lsbwav_core::codec::{capacity_bits, required_bits};
use lsbwav_core::wav::write_wav_file;
use lsbwav_core::{encode, EmbedOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::json_output::{
    error_codes, input_error_to_json, stego_error_to_json, EncodeOutput, EncodeResult, JsonError,
};
use super::reporting::{display_path, print_error, print_json};
use crate::config::StegoConfig;
use crate::input::load_audio;

/// Run the encode command
///
/// # Arguments
/// * `input` - Cover audio file (WAV, MP3 or FLAC)
/// * `message` - Message text given on the command line
/// * `message_file` - File whose raw bytes are the message
/// * `output` - Output WAV path (default: `<stem>.stego.wav` next to the input)
/// * `lsb_depth` - Overrides the configured depth
/// * `config` - Loaded configuration
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input: &str,
    message: Option<&str>,
    message_file: Option<&str>,
    output: Option<&str>,
    lsb_depth: Option<u8>,
    config: &StegoConfig,
    json_output: bool,
) -> Result<ExitCode> {
    let options = config.embed_options(lsb_depth);
    let outcome = read_message(message, message_file).and_then(|message| {
        encode_file(
            Path::new(input),
            &message,
            output.map(Path::new),
            &options,
            config,
        )
    });

    if json_output {
        return match outcome {
            Ok(result) => print_json(&EncodeOutput::success(result), true),
            Err(error) => print_json(&EncodeOutput::failure(vec![error]), false),
        };
    }

    match outcome {
        Ok(result) => {
            print_result(&result);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => Ok(print_error(&error)),
    }
}

/// Resolve the message from the command-line text or a file.
fn read_message(message: Option<&str>, message_file: Option<&str>) -> Result<Vec<u8>, JsonError> {
    match (message, message_file) {
        (Some(text), _) => Ok(text.as_bytes().to_vec()),
        (None, Some(path)) => std::fs::read(path).map_err(|e| {
            JsonError::new(
                error_codes::FILE_READ,
                format!("failed to read message file '{}': {}", path, e),
            )
            .with_file(path)
        }),
        (None, None) => Ok(Vec::new()),
    }
}

/// Default output path: `<dir>/<stem>.stego.wav`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}.stego.wav", stem))
}

/// Load the cover, embed `message`, and write the stego WAV.
pub fn encode_file(
    input: &Path,
    message: &[u8],
    output: Option<&Path>,
    options: &EmbedOptions,
    config: &StegoConfig,
) -> Result<EncodeResult, JsonError> {
    if message.is_empty() {
        return Err(JsonError::new(error_codes::EMPTY_MESSAGE, "no message provided"));
    }

    let input_display = display_path(input);
    let loaded = load_audio(input, config)
        .map_err(|e| input_error_to_json(&e, Some(input_display.as_str())))?;

    let capacity =
        capacity_bits(&loaded.waveform, options).map_err(|e| stego_error_to_json(&e))?;
    let stego = encode(&loaded.waveform, message, options)
        .map_err(|e| stego_error_to_json(&e).with_file(input_display.as_str()))?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));
    let output_display = display_path(&output);
    write_wav_file(&output, &stego).map_err(|e| {
        JsonError::new(
            error_codes::FILE_WRITE,
            format!("failed to write '{}': {}", output_display, e),
        )
        .with_file(output_display.as_str())
    })?;

    tracing::info!(
        input = %input_display,
        output = %output_display,
        message_bytes = message.len(),
        "wrote stego WAV"
    );

    Ok(EncodeResult {
        input: input_display,
        output: output_display,
        source_kind: loaded.source_kind,
        format: stego.format().into(),
        message_bytes: message.len(),
        used_bits: required_bits(message.len()),
        capacity_bits: capacity,
        lsb_depth: options.lsb_depth,
        pcm_hash: stego.pcm_hash(),
    })
}

fn print_result(result: &EncodeResult) {
    let percent = result.used_bits as f64 / result.capacity_bits as f64 * 100.0;
    println!("{}", "Message embedded".green().bold());
    println!("  {} {} ({})", "Input:".dimmed(), result.input, result.source_kind);
    println!("  {} {}", "Output:".dimmed(), result.output);
    println!(
        "  {} {} ch, {} Hz, {}-bit",
        "Format:".dimmed(),
        result.format.channels,
        result.format.sample_rate,
        result.format.bits_per_sample
    );
    println!("  {} {} bytes", "Message:".dimmed(), result.message_bytes);
    println!(
        "  {} {} of {} bits ({:.2}%) at depth {}",
        "Used:".dimmed(),
        result.used_bits,
        result.capacity_bits,
        percent,
        result.lsb_depth
    );
}
