//! Decode command implementation
//!
//! Extracts a hidden message from an audio file.

use anyhow::Result;
use colored::Colorize;
use lsbwav_core::{decode, EmbedOptions};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    error_codes, input_error_to_json, stego_error_to_json, DecodeOutput, DecodeResult, JsonError,
};
use super::reporting::{display_path, print_error, print_json};
use crate::config::StegoConfig;
use crate::input::load_audio;

/// Run the decode command
///
/// # Arguments
/// * `input` - Audio file carrying the message
/// * `output` - Write the raw message bytes here instead of printing them
/// * `lsb_depth` - Overrides the configured depth; must match the encoder
/// * `config` - Loaded configuration
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input: &str,
    output: Option<&str>,
    lsb_depth: Option<u8>,
    config: &StegoConfig,
    json_output: bool,
) -> Result<ExitCode> {
    let options = config.embed_options(lsb_depth);
    let outcome = decode_file(Path::new(input), output.map(Path::new), &options, config);

    if json_output {
        return match outcome {
            Ok(result) => print_json(&DecodeOutput::success(result), true),
            Err(error) => print_json(&DecodeOutput::failure(vec![error]), false),
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

/// Load `input` and extract its message, optionally writing the raw bytes
/// to `output`.
pub fn decode_file(
    input: &Path,
    output: Option<&Path>,
    options: &EmbedOptions,
    config: &StegoConfig,
) -> Result<DecodeResult, JsonError> {
    let input_display = display_path(input);
    let loaded = load_audio(input, config)
        .map_err(|e| input_error_to_json(&e, Some(input_display.as_str())))?;

    let bytes = decode(&loaded.waveform, options)
        .map_err(|e| stego_error_to_json(&e).with_file(input_display.as_str()))?;

    let output = match output {
        Some(path) => {
            let path_display = display_path(path);
            std::fs::write(path, &bytes).map_err(|e| {
                JsonError::new(
                    error_codes::FILE_WRITE,
                    format!("failed to write '{}': {}", path_display, e),
                )
                .with_file(path_display.as_str())
            })?;
            Some(path_display)
        }
        None => None,
    };

    tracing::info!(input = %input_display, message_bytes = bytes.len(), "extracted message");

    let utf8 = std::str::from_utf8(&bytes).is_ok();
    Ok(DecodeResult {
        message: String::from_utf8_lossy(&bytes).into_owned(),
        message_bytes: bytes.len(),
        utf8,
        output,
    })
}

fn print_result(result: &DecodeResult) {
    if let Some(ref path) = result.output {
        println!(
            "{} Wrote {} bytes to {}",
            "ok".green(),
            result.message_bytes,
            path
        );
        return;
    }

    if !result.utf8 {
        eprintln!(
            "{} message is not valid UTF-8; showing a lossy rendering (use -o to save the raw bytes)",
            "warning:".yellow().bold()
        );
    }
    println!("{}", result.message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsbwav_core::wav::write_wav_file;
    use lsbwav_core::{encode, PcmFormat, Waveform};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn write_stego(dir: &Path, message: &[u8], options: &EmbedOptions) -> PathBuf {
        let path = dir.join("stego.wav");
        let cover = Waveform::silence(PcmFormat::stereo(44100), 2000).unwrap();
        let stego = encode(&cover, message, options).unwrap();
        write_wav_file(&path, &stego).unwrap();
        path
    }

    #[test]
    fn test_decode_text_message() {
        let dir = tempfile::tempdir().unwrap();
        let options = EmbedOptions::default();
        let path = write_stego(dir.path(), "halo dunia".as_bytes(), &options);

        let result = decode_file(&path, None, &options, &StegoConfig::default()).unwrap();
        assert_eq!(result.message, "halo dunia");
        assert_eq!(result.message_bytes, 10);
        assert!(result.utf8);
        assert_eq!(result.output, None);
    }

    #[test]
    fn test_decode_binary_message_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let options = EmbedOptions::with_depth(2);
        let payload = [0xFFu8, 0x00, 0xC3, 0x28];
        let path = write_stego(dir.path(), &payload, &options);
        let out = dir.path().join("secret.bin");

        let result =
            decode_file(&path, Some(out.as_path()), &options, &StegoConfig::default()).unwrap();
        assert!(!result.utf8);
        assert_eq!(std::fs::read(&out).unwrap(), payload.to_vec());
        assert_eq!(result.output, Some(display_path(&out)));
    }

    #[test]
    fn test_decode_cover_without_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.wav");
        let cover = Waveform::silence(PcmFormat::mono(8000), 8000).unwrap();
        write_wav_file(&path, &cover).unwrap();

        let err = decode_file(&path, None, &EmbedOptions::default(), &StegoConfig::default())
            .unwrap_err();
        assert_eq!(err.code, "STEGO_002");
        assert_eq!(err.message, "no hidden message found or file corrupted");
    }

    #[test]
    fn test_decode_uses_configured_depth() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_stego(dir.path(), b"deep", &EmbedOptions::with_depth(3));
        let config = StegoConfig {
            lsb_depth: 3,
            ..StegoConfig::default()
        };

        let result = decode_file(&path, None, &config.embed_options(None), &config).unwrap();
        assert_eq!(result.message, "deep");
    }
}
