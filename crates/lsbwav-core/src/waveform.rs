//! In-memory PCM waveform.
//!
//! Samples are stored channel-interleaved and frame-ascending as `i32`
//! regardless of the source bit depth. This is also the order the codec walks
//! when embedding, so sample index `n` here is bit slot `n` of the carrier.

use crate::error::{StegoError, StegoResult};
use crate::wav::PcmFormat;

/// An integer PCM waveform: format metadata plus interleaved samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waveform {
    format: PcmFormat,
    samples: Vec<i32>,
}

impl Waveform {
    /// Creates a waveform, validating the format and sample data.
    ///
    /// # Errors
    /// Returns [`StegoError::InvalidWaveform`] if the sample count is not a
    /// whole number of frames or a sample is outside the range of the bit
    /// depth, and [`StegoError::UnsupportedFormat`] for unsupported widths.
    pub fn new(format: PcmFormat, samples: Vec<i32>) -> StegoResult<Self> {
        format.validate()?;

        let channels = format.channels as usize;
        if samples.len() % channels != 0 {
            return Err(StegoError::invalid_waveform(format!(
                "{} samples is not a whole number of {}-channel frames",
                samples.len(),
                channels
            )));
        }

        let (min, max) = format.sample_range();
        if let Some((index, value)) = samples
            .iter()
            .enumerate()
            .find(|&(_, &s)| s < min || s > max)
        {
            return Err(StegoError::invalid_waveform(format!(
                "sample {} = {} is outside the {}-bit range",
                index, value, format.bits_per_sample
            )));
        }

        Ok(Self { format, samples })
    }

    /// Creates an all-zero waveform with the given number of frames.
    pub fn silence(format: PcmFormat, frames: usize) -> StegoResult<Self> {
        let len = frames * format.channels as usize;
        Self::new(format, vec![0; len])
    }

    /// Format metadata.
    pub fn format(&self) -> PcmFormat {
        self.format
    }

    /// Number of channels.
    pub fn channels(&self) -> u16 {
        self.format.channels
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }

    /// Bits per sample.
    pub fn bits_per_sample(&self) -> u16 {
        self.format.bits_per_sample
    }

    /// Number of frames (samples per channel).
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.format.channels as usize
    }

    /// Total number of samples across all channels.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    /// Mutable access to the samples. The length cannot change, which keeps the
    /// frame count fixed.
    pub(crate) fn samples_mut(&mut self) -> &mut [i32] {
        &mut self.samples
    }

    /// Samples of one frame, one per channel.
    pub fn frame(&self, index: usize) -> Option<&[i32]> {
        let channels = self.format.channels as usize;
        let start = index.checked_mul(channels)?;
        self.samples.get(start..start + channels)
    }

    /// Iterates over frames.
    pub fn frames(&self) -> impl Iterator<Item = &[i32]> {
        self.samples.chunks_exact(self.format.channels as usize)
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.frame_count() as f64 / self.format.sample_rate as f64
    }

    /// BLAKE3 hash of the sample values (little-endian `i32`), hex encoded.
    ///
    /// Independent of the container, so two files with the same audio content
    /// hash equal even if their headers differ.
    pub fn pcm_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for sample in &self.samples {
            hasher.update(&sample.to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }

    /// Consumes the waveform and returns its samples.
    pub fn into_samples(self) -> Vec<i32> {
        self.samples
    }
}
