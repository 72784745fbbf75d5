//! PCM format parameters.

use crate::error::{StegoError, StegoResult};

/// Sample widths the WAV reader and writer accept.
pub const SUPPORTED_BIT_DEPTHS: [u16; 4] = [8, 16, 24, 32];

/// Integer PCM format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PcmFormat {
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (8, 16, 24 or 32).
    pub bits_per_sample: u16,
}

impl PcmFormat {
    /// Creates a format with explicit parameters.
    pub fn new(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample,
        }
    }

    /// Creates a mono 16-bit format.
    pub fn mono(sample_rate: u32) -> Self {
        Self::new(1, sample_rate, 16)
    }

    /// Creates a stereo 16-bit format.
    pub fn stereo(sample_rate: u32) -> Self {
        Self::new(2, sample_rate, 16)
    }

    /// Checks that the format describes integer PCM we can carry.
    pub fn validate(&self) -> StegoResult<()> {
        if self.channels == 0 {
            return Err(StegoError::invalid_waveform("channel count must be at least 1"));
        }
        if self.sample_rate == 0 {
            return Err(StegoError::invalid_waveform("sample rate must be positive"));
        }
        if !SUPPORTED_BIT_DEPTHS.contains(&self.bits_per_sample) {
            return Err(StegoError::unsupported_format(format!(
                "{}-bit samples (supported: 8, 16, 24, 32)",
                self.bits_per_sample
            )));
        }
        // The fmt chunk stores block align as u16 and byte rate as u32.
        if self.block_align() > u16::MAX as u32 || self.byte_rate() > u32::MAX as u64 {
            return Err(StegoError::unsupported_format(format!(
                "{} channels of {}-bit samples at {} Hz does not fit a WAV header",
                self.channels, self.bits_per_sample, self.sample_rate
            )));
        }
        Ok(())
    }

    /// Bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Bytes per sample frame.
    pub fn block_align(&self) -> u32 {
        self.channels as u32 * self.bytes_per_sample() as u32
    }

    /// Bytes per second.
    pub fn byte_rate(&self) -> u64 {
        self.sample_rate as u64 * self.block_align() as u64
    }

    /// Inclusive signed range a sample of this width can take.
    pub fn sample_range(&self) -> (i32, i32) {
        match self.bits_per_sample {
            32 => (i32::MIN, i32::MAX),
            bits => {
                let half = 1i32 << (bits - 1);
                (-half, half - 1)
            }
        }
    }
}

impl From<PcmFormat> for hound::WavSpec {
    fn from(format: PcmFormat) -> Self {
        hound::WavSpec {
            channels: format.channels,
            sample_rate: format.sample_rate,
            bits_per_sample: format.bits_per_sample,
            sample_format: hound::SampleFormat::Int,
        }
    }
}
