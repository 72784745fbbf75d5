//! Error types for the steganography core.

use thiserror::Error;

/// Result type for lsbwav operations.
pub type StegoResult<T> = Result<T, StegoError>;

/// Errors that can occur while reading, embedding, extracting, or transcoding.
#[derive(Debug, Error)]
pub enum StegoError {
    /// The message does not fit in the waveform at the requested depth.
    #[error("message needs {required_bits} bits but the waveform only holds {capacity_bits}")]
    CapacityExceeded {
        /// Bits needed for header plus message.
        required_bits: u64,
        /// Bits available in the waveform.
        capacity_bits: u64,
    },

    /// No consistent embedded payload was found.
    #[error("no hidden message found or file corrupted")]
    NoHiddenMessage,

    /// The waveform is too short to hold even the message header.
    #[error("waveform holds {capacity_bits} bits, fewer than the {required_bits}-bit header")]
    TruncatedWaveform {
        /// Bits available in the waveform.
        capacity_bits: u64,
        /// Bits needed for the header alone.
        required_bits: u64,
    },

    /// The embedding depth is out of range for this waveform.
    #[error("invalid LSB depth {depth} for {bits_per_sample}-bit samples")]
    InvalidLsbDepth {
        /// Requested number of low bits per sample.
        depth: u8,
        /// Sample width of the waveform.
        bits_per_sample: u16,
    },

    /// A waveform invariant was violated.
    #[error("invalid waveform: {message}")]
    InvalidWaveform {
        /// Error message.
        message: String,
    },

    /// The audio container uses a format the codec cannot operate on.
    #[error("unsupported audio format: {message}")]
    UnsupportedFormat {
        /// Error message.
        message: String,
    },

    /// WAV container parse or write error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The external transcoder could not be located.
    #[error("ffmpeg executable not found. Install ffmpeg and ensure it is in PATH, or set FFMPEG_PATH")]
    TranscoderNotFound,

    /// The external transcoder could not be started.
    #[error("failed to spawn ffmpeg: {0}")]
    TranscodeSpawn(#[source] std::io::Error),

    /// The external transcoder exited with a non-zero status.
    #[error("ffmpeg exited with status {exit_code}: {stderr}")]
    TranscodeFailed {
        /// Process exit code (-1 when terminated by a signal).
        exit_code: i32,
        /// Captured diagnostic output.
        stderr: String,
    },
}

impl StegoError {
    /// Creates an invalid waveform error.
    pub fn invalid_waveform(message: impl Into<String>) -> Self {
        Self::InvalidWaveform {
            message: message.into(),
        }
    }

    /// Creates an unsupported format error.
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            StegoError::CapacityExceeded { .. } => "STEGO_001",
            StegoError::NoHiddenMessage => "STEGO_002",
            StegoError::TruncatedWaveform { .. } => "STEGO_003",
            StegoError::InvalidLsbDepth { .. } => "STEGO_004",
            StegoError::InvalidWaveform { .. } => "STEGO_005",
            StegoError::UnsupportedFormat { .. } => "STEGO_006",
            StegoError::Wav(_) => "STEGO_007",
            StegoError::Io(_) => "STEGO_008",
            StegoError::TranscoderNotFound => "STEGO_009",
            StegoError::TranscodeSpawn(_) => "STEGO_010",
            StegoError::TranscodeFailed { .. } => "STEGO_011",
        }
    }

    /// Returns true for errors caused by the payload rather than the environment.
    ///
    /// These are deterministic: retrying with the same inputs gives the same error.
    pub fn is_payload_error(&self) -> bool {
        matches!(
            self,
            StegoError::CapacityExceeded { .. }
                | StegoError::NoHiddenMessage
                | StegoError::TruncatedWaveform { .. }
        )
    }
}
