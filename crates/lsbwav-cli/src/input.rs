//! Input loading for audio files.
//!
//! Dispatches by file extension: PCM WAV is read directly, compressed formats
//! are converted to a temporary PCM WAV by ffmpeg first. Size and extension
//! checks run before any audio data is read; for compressed inputs the
//! converted WAV is checked against the same size limit before it is read.

use lsbwav_core::wav::read_wav_file;
use lsbwav_core::{StegoError, Transcoder, Waveform};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::StegoConfig;

/// Extensions read directly as PCM WAV.
pub const WAV_EXTENSIONS: &[&str] = &["wav"];

/// Extensions converted through the transcoder.
pub const TRANSCODE_EXTENSIONS: &[&str] = &["mp3", "flac"];

/// How the waveform was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Read directly from a PCM WAV file.
    Wav,
    /// Converted from a compressed format by ffmpeg.
    Transcoded,
}

impl SourceKind {
    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Wav => "wav",
            SourceKind::Transcoded => "transcoded",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A loaded audio input.
#[derive(Debug)]
pub struct LoadedAudio {
    /// Decoded PCM waveform.
    pub waveform: Waveform,
    /// How the waveform was obtained.
    pub source_kind: SourceKind,
    /// Size of the input file on disk.
    pub file_bytes: u64,
}

/// Errors that can occur while loading audio.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Extension is not one of the supported audio formats.
    UnknownExtension { extension: Option<String> },

    /// File exceeds the configured size limit.
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    /// Audio could not be decoded or transcoded.
    Audio { path: PathBuf, source: StegoError },
}

impl InputError {
    fn expected_extensions() -> String {
        WAV_EXTENSIONS
            .iter()
            .chain(TRANSCODE_EXTENSIONS)
            .map(|ext| format!(".{}", ext))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::UnknownExtension { extension } => match extension {
                Some(ext) => write!(
                    f,
                    "unsupported file extension '.{}' (expected {})",
                    ext,
                    Self::expected_extensions()
                ),
                None => write!(
                    f,
                    "file has no extension (expected {})",
                    Self::expected_extensions()
                ),
            },
            InputError::TooLarge { path, size, limit } => write!(
                f,
                "file '{}' is {} bytes, larger than the {} byte limit",
                path.display(),
                size,
                limit
            ),
            InputError::Audio { source, .. } => write!(f, "{}", source),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            InputError::Audio { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Load an audio file as a PCM waveform, dispatching by extension.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use lsbwav_cli::config::StegoConfig;
/// use lsbwav_cli::input::load_audio;
///
/// let loaded = load_audio(Path::new("song.mp3"), &StegoConfig::default()).unwrap();
/// println!("{} frames ({})", loaded.waveform.frame_count(), loaded.source_kind);
/// ```
pub fn load_audio(path: &Path, config: &StegoConfig) -> Result<LoadedAudio, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    let source_kind = match extension.as_deref() {
        Some(ext) if WAV_EXTENSIONS.contains(&ext) => SourceKind::Wav,
        Some(ext) if TRANSCODE_EXTENSIONS.contains(&ext) => SourceKind::Transcoded,
        _ => return Err(InputError::UnknownExtension { extension }),
    };

    let file_bytes = check_input_size(path, config.max_input_bytes)?;

    let audio_error = |source: StegoError| InputError::Audio {
        path: path.to_path_buf(),
        source,
    };

    let waveform = match source_kind {
        SourceKind::Wav => read_wav_file(path).map_err(audio_error)?,
        SourceKind::Transcoded => {
            let transcoder = Transcoder::with_config(config.transcoder_config());
            let wav = transcoder.to_pcm_wav(path).map_err(audio_error)?;
            // Decompressed PCM is held to the same limit as the file on disk.
            check_input_size(wav.path(), config.max_input_bytes).map_err(|e| match e {
                InputError::TooLarge { size, limit, .. } => InputError::TooLarge {
                    path: path.to_path_buf(),
                    size,
                    limit,
                },
                other => other,
            })?;
            wav.read_waveform().map_err(audio_error)?
        }
    };

    tracing::debug!(
        path = %path.display(),
        source = %source_kind,
        file_bytes,
        frames = waveform.frame_count(),
        "loaded audio"
    );

    Ok(LoadedAudio {
        waveform,
        source_kind,
        file_bytes,
    })
}

/// Returns the size of `path`, or `TooLarge` if it exceeds `limit`.
fn check_input_size(path: &Path, limit: u64) -> Result<u64, InputError> {
    let size = std::fs::metadata(path)
        .map_err(|e| InputError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();

    if size > limit {
        return Err(InputError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit,
        });
    }
    Ok(size)
}
