//! WAV decoding into a [`Waveform`].

use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use crate::error::{StegoError, StegoResult};
use crate::waveform::Waveform;

use super::format::PcmFormat;

/// Reads an integer PCM WAV stream into memory.
///
/// # Errors
/// - [`StegoError::UnsupportedFormat`] for float samples or unsupported widths
/// - [`StegoError::Wav`] if the container is malformed or truncated
pub fn read_wav<R: Read>(reader: R) -> StegoResult<Waveform> {
    let reader = hound::WavReader::new(reader)?;
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int {
        return Err(StegoError::unsupported_format(
            "only integer PCM WAV can carry a message, got floating-point samples",
        ));
    }

    let format = PcmFormat::new(spec.channels, spec.sample_rate, spec.bits_per_sample);
    format.validate()?;

    let samples = reader
        .into_samples::<i32>()
        .collect::<Result<Vec<i32>, _>>()?;

    tracing::debug!(
        channels = format.channels,
        sample_rate = format.sample_rate,
        bits_per_sample = format.bits_per_sample,
        samples = samples.len(),
        "read WAV"
    );

    Waveform::new(format, samples)
}

/// Reads a WAV file held in memory.
pub fn read_wav_bytes(bytes: &[u8]) -> StegoResult<Waveform> {
    read_wav(Cursor::new(bytes))
}

/// Reads a WAV file from disk.
pub fn read_wav_file(path: &Path) -> StegoResult<Waveform> {
    let file = File::open(path)?;
    read_wav(BufReader::new(file))
}
