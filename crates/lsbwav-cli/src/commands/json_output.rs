//! JSON output types for machine-readable CLI output.
//!
//! This module provides structured output types for the `--json` flag on
//! `encode`, `decode`, `capacity`, and `inspect`. Every document carries a
//! `success` flag and an `errors` list, so callers can check one field and
//! branch without parsing human text.

use lsbwav_core::{PcmFormat, StegoError};
use serde::{Deserialize, Serialize};

use crate::input::{InputError, SourceKind};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Format: CLI_XXX for CLI-level errors; codec and audio errors pass through
/// their STEGO_XXX codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unsupported file extension
    pub const UNKNOWN_EXTENSION: &str = "CLI_002";
    /// Input exceeds the configured size limit
    pub const INPUT_TOO_LARGE: &str = "CLI_003";
    /// Output file could not be written
    pub const FILE_WRITE: &str = "CLI_004";
    /// No message to embed
    pub const EMPTY_MESSAGE: &str = "CLI_005";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "STEGO_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Suggestion for fixing the error (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
            suggestion: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Audio format as reported in JSON output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatInfo {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl From<PcmFormat> for FormatInfo {
    fn from(format: PcmFormat) -> Self {
        Self {
            channels: format.channels,
            sample_rate: format.sample_rate,
            bits_per_sample: format.bits_per_sample,
        }
    }
}

/// Result details for a successful `encode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeResult {
    /// Cover file path
    pub input: String,
    /// Written stego WAV path
    pub output: String,
    /// How the cover was loaded
    pub source_kind: SourceKind,
    /// Format of the written WAV
    pub format: FormatInfo,
    /// Embedded message size in bytes
    pub message_bytes: usize,
    /// Bits written, header included
    pub used_bits: u64,
    /// Total bits available in the cover
    pub capacity_bits: u64,
    /// Low bits per sample used
    pub lsb_depth: u8,
    /// BLAKE3 hash of the stego samples
    pub pcm_hash: String,
}

/// JSON output for the `encode` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeOutput {
    /// Whether the message was embedded and written
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<EncodeResult>,
}

impl EncodeOutput {
    /// Creates a successful encode output.
    pub fn success(result: EncodeResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed encode output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Result details for a successful `decode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeResult {
    /// Recovered message, lossily decoded as UTF-8
    pub message: String,
    /// Recovered message size in bytes
    pub message_bytes: usize,
    /// Whether the raw bytes were valid UTF-8
    pub utf8: bool,
    /// File the raw bytes were written to (if requested)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// JSON output for the `decode` command.
///
/// The message is flattened to the top level: `{"success": true, "message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeOutput {
    /// Whether a message was recovered
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Details (on success)
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub result: Option<DecodeResult>,
}

impl DecodeOutput {
    /// Creates a successful decode output.
    pub fn success(result: DecodeResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed decode output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Result details for `capacity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapacityResult {
    pub input: String,
    pub source_kind: SourceKind,
    pub lsb_depth: u8,
    pub sample_count: usize,
    pub capacity_bits: u64,
    pub header_bits: u64,
    /// Largest message that fits, in bytes
    pub max_message_bytes: usize,
}

/// JSON output for the `capacity` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CapacityResult>,
}

impl CapacityOutput {
    /// Creates a successful capacity output.
    pub fn success(result: CapacityResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed capacity output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Result details for `inspect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectResult {
    pub input: String,
    pub source_kind: SourceKind,
    /// Size of the input file on disk
    pub file_bytes: u64,
    pub format: FormatInfo,
    pub frames: usize,
    pub duration_seconds: f64,
    /// BLAKE3 hash of the decoded samples
    pub pcm_hash: String,
}

/// JSON output for the `inspect` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectResult>,
}

impl InspectOutput {
    /// Creates a successful inspect output.
    pub fn success(result: InspectResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed inspect output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Converts a StegoError to a JsonError, keeping its stable code.
pub fn stego_error_to_json(err: &StegoError) -> JsonError {
    let error = JsonError::new(err.code(), err.to_string());
    match err {
        StegoError::TranscoderNotFound => error.with_suggestion(
            "Install ffmpeg, set FFMPEG_PATH, or set ffmpeg_path in the config file",
        ),
        StegoError::UnsupportedFormat { .. } => {
            error.with_suggestion("Convert the file to integer PCM WAV")
        }
        StegoError::CapacityExceeded { .. } => {
            error.with_suggestion("Use a longer cover file or a larger --lsb-depth")
        }
        _ => error,
    }
}

/// Converts an InputError to a JsonError.
pub fn input_error_to_json(err: &InputError, file: Option<&str>) -> JsonError {
    let error = match err {
        InputError::FileRead { .. } => JsonError::new(error_codes::FILE_READ, err.to_string()),
        InputError::UnknownExtension { .. } => {
            JsonError::new(error_codes::UNKNOWN_EXTENSION, err.to_string())
        }
        InputError::TooLarge { .. } => JsonError::new(error_codes::INPUT_TOO_LARGE, err.to_string())
            .with_suggestion("Raise max_input_bytes in the config file"),
        InputError::Audio { source, .. } => stego_error_to_json(source),
    };

    match file {
        Some(f) => error.with_file(f),
        None => error,
    }
}
