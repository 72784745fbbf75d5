//! CLI configuration.
//!
//! Every field has a default, so a config file only needs to name the values
//! it changes. Nothing here is global: the loaded config is passed into each
//! command explicitly.

use anyhow::{Context, Result};
use lsbwav_core::codec::MAX_LSB_DEPTH;
use lsbwav_core::transcode::{DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE};
use lsbwav_core::{EmbedOptions, TranscoderConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default upper bound on input file size (2 GiB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 2 * 1024 * 1024 * 1024;

/// Settings shared by all commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    /// Inputs larger than this are rejected before they are read. Applies to
    /// the file on disk and to the PCM WAV converted from MP3/FLAC.
    pub max_input_bytes: u64,
    /// Low bits per sample used when `--lsb-depth` is not given.
    pub lsb_depth: u8,
    /// Explicit ffmpeg executable.
    pub ffmpeg_path: Option<PathBuf>,
    /// Sample rate of transcoded inputs.
    pub transcode_sample_rate: u32,
    /// Channel count of transcoded inputs.
    pub transcode_channels: u16,
}

impl Default for StegoConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            lsb_depth: 1,
            ffmpeg_path: None,
            transcode_sample_rate: DEFAULT_SAMPLE_RATE,
            transcode_channels: DEFAULT_CHANNELS,
        }
    }
}

impl StegoConfig {
    /// Load a config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Rejects values no command could work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_input_bytes == 0 {
            anyhow::bail!("max_input_bytes must be greater than 0");
        }
        if self.lsb_depth == 0 || self.lsb_depth > MAX_LSB_DEPTH {
            anyhow::bail!(
                "lsb_depth must be between 1 and {}, got {}",
                MAX_LSB_DEPTH,
                self.lsb_depth
            );
        }
        if self.transcode_sample_rate == 0 {
            anyhow::bail!("transcode_sample_rate must be greater than 0");
        }
        if self.transcode_channels == 0 {
            anyhow::bail!("transcode_channels must be greater than 0");
        }
        Ok(())
    }

    /// Embed options, with the command-line depth taking precedence.
    pub fn embed_options(&self, lsb_depth: Option<u8>) -> EmbedOptions {
        EmbedOptions::with_depth(lsb_depth.unwrap_or(self.lsb_depth))
    }

    /// Transcoder settings derived from this config.
    pub fn transcoder_config(&self) -> TranscoderConfig {
        let config = TranscoderConfig::default()
            .sample_rate(self.transcode_sample_rate)
            .channels(self.transcode_channels);
        match self.ffmpeg_path {
            Some(ref path) => config.ffmpeg_path(path.clone()),
            None => config,
        }
    }
}
