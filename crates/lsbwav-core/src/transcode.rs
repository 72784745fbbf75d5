//! ffmpeg subprocess wrapper for turning compressed audio into PCM WAV.
//!
//! Lossy formats destroy least-significant-bit information, so anything that
//! is not already PCM WAV has to pass through here before the codec can read
//! or write it. The transcoder is treated as an opaque tool: we hand it an
//! argument list and look only at its exit status and stderr.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{StegoError, StegoResult};
use crate::wav::read_wav_file;
use crate::waveform::Waveform;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default output channel count (mono).
pub const DEFAULT_CHANNELS: u16 = 1;

/// Environment variable consulted when no explicit path is configured.
pub const FFMPEG_PATH_ENV: &str = "FFMPEG_PATH";

/// Configuration for the transcoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscoderConfig {
    /// Explicit ffmpeg executable. When set it must exist; no fallback applies.
    pub ffmpeg_path: Option<PathBuf>,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Output channel count.
    pub channels: u16,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
        }
    }
}

impl TranscoderConfig {
    /// Sets the ffmpeg executable path.
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffmpeg_path = Some(path.into());
        self
    }

    /// Sets the output sample rate.
    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Sets the output channel count.
    pub fn channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }
}

/// A PCM WAV produced by the transcoder.
///
/// The file lives in the system temp directory and is deleted on drop.
#[derive(Debug)]
pub struct TranscodedWav {
    path: tempfile::TempPath,
}

impl TranscodedWav {
    /// Location of the temporary WAV.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the temporary WAV into memory.
    pub fn read_waveform(&self) -> StegoResult<Waveform> {
        read_wav_file(&self.path)
    }
}

/// Runs ffmpeg to produce PCM WAV.
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    config: TranscoderConfig,
}

impl Transcoder {
    /// Creates a transcoder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transcoder with the given configuration.
    pub fn with_config(config: TranscoderConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    /// Finds the ffmpeg executable.
    ///
    /// Order: configured path, then `FFMPEG_PATH`, then `ffmpeg` on `PATH`.
    pub fn locate(&self) -> StegoResult<PathBuf> {
        if let Some(ref path) = self.config.ffmpeg_path {
            return if path.exists() {
                Ok(path.clone())
            } else {
                Err(StegoError::TranscoderNotFound)
            };
        }

        if let Ok(path) = std::env::var(FFMPEG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        which::which("ffmpeg").map_err(|_| StegoError::TranscoderNotFound)
    }

    /// Arguments converting `input` into PCM WAV at `output`.
    pub fn pcm_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-i"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(input.as_os_str().to_owned());
        args.push("-ar".into());
        args.push(self.config.sample_rate.to_string().into());
        args.push("-ac".into());
        args.push(self.config.channels.to_string().into());
        args.extend(["-c:a", "pcm_s16le", "-f", "wav", "-y"].map(OsString::from));
        args.push(output.as_os_str().to_owned());
        args
    }

    /// Converts `input` to a temporary 16-bit PCM WAV.
    ///
    /// # Errors
    /// - [`StegoError::TranscoderNotFound`] if ffmpeg cannot be located
    /// - [`StegoError::TranscodeSpawn`] if the process cannot be started
    /// - [`StegoError::TranscodeFailed`] if ffmpeg exits unsuccessfully
    pub fn to_pcm_wav(&self, input: &Path) -> StegoResult<TranscodedWav> {
        let ffmpeg = self.locate()?;
        let output = tempfile::Builder::new()
            .prefix("lsbwav-")
            .suffix(".wav")
            .tempfile()?
            .into_temp_path();

        let args = self.pcm_args(input, &output);
        tracing::debug!(ffmpeg = %ffmpeg.display(), ?args, "running transcoder");

        let result = Command::new(&ffmpeg)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(StegoError::TranscodeSpawn)?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            let exit_code = result.status.code().unwrap_or(-1);
            tracing::error!(exit_code, %stderr, input = %input.display(), "ffmpeg failed");
            return Err(StegoError::TranscodeFailed { exit_code, stderr });
        }

        tracing::debug!(output = %output.display(), "transcoded to PCM WAV");
        Ok(TranscodedWav { path: output })
    }

    /// First line of `ffmpeg -version`, if ffmpeg runs.
    pub fn version(&self) -> StegoResult<String> {
        let ffmpeg = self.locate()?;
        let output = Command::new(&ffmpeg)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map_err(StegoError::TranscodeSpawn)?;

        if !output.status.success() {
            return Err(StegoError::TranscodeFailed {
                exit_code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string())
    }
}
