//! Least-significant-bit message codec.
//!
//! A message is stored in the low bit(s) of the carrier's samples, walked in
//! interleaved, frame-ascending order. The payload is preceded by a header:
//!
//! ```text
//! [16 bits] magic 0x4C57 ("LW"), big-endian
//! [32 bits] message length in bytes, big-endian
//! [8 * length bits] message, MSB first
//! ```
//!
//! Samples after the payload are left bit-identical, which bounds distortion
//! to the samples that actually carry data.
//!
//! # Example
//!
//! ```
//! use lsbwav_core::codec::{decode, encode, EmbedOptions};
//! use lsbwav_core::{PcmFormat, Waveform};
//!
//! let cover = Waveform::silence(PcmFormat::mono(8000), 8000)?;
//! let options = EmbedOptions::default();
//! let stego = encode(&cover, b"HELLO", &options)?;
//! assert_eq!(decode(&stego, &options)?, b"HELLO");
//! # Ok::<(), lsbwav_core::StegoError>(())
//! ```

mod bits;

#[cfg(test)]
mod tests;

use crate::error::{StegoError, StegoResult};
use crate::waveform::Waveform;

use bits::{LsbReader, LsbWriter};

/// Marker written before the length prefix.
pub const HEADER_MAGIC: u16 = 0x4C57;

/// Bits taken by the header (magic + length prefix).
pub const HEADER_BITS: u64 = 48;

/// Deepest supported embedding, in bits per sample.
pub const MAX_LSB_DEPTH: u8 = 4;

/// Parameters shared by the encoder and decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedOptions {
    /// Low bits per sample that carry payload.
    pub lsb_depth: u8,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self { lsb_depth: 1 }
    }
}

impl EmbedOptions {
    /// Options with the given depth.
    pub fn with_depth(lsb_depth: u8) -> Self {
        Self { lsb_depth }
    }

    /// Checks the depth against the sample width of a waveform.
    ///
    /// The depth must be in `1..=MAX_LSB_DEPTH` and leave at least one
    /// untouched high bit in every sample.
    pub fn validate_for(&self, bits_per_sample: u16) -> StegoResult<()> {
        if self.lsb_depth == 0
            || self.lsb_depth > MAX_LSB_DEPTH
            || self.lsb_depth as u16 >= bits_per_sample
        {
            return Err(StegoError::InvalidLsbDepth {
                depth: self.lsb_depth,
                bits_per_sample,
            });
        }
        Ok(())
    }
}

/// Bits needed to embed a message of `message_len` bytes, header included.
pub fn required_bits(message_len: usize) -> u64 {
    HEADER_BITS + 8 * message_len as u64
}

/// Total payload bits the waveform can carry at the given depth.
pub fn capacity_bits(waveform: &Waveform, options: &EmbedOptions) -> StegoResult<u64> {
    options.validate_for(waveform.bits_per_sample())?;
    Ok(waveform.sample_count() as u64 * options.lsb_depth as u64)
}

/// Largest message, in bytes, that fits in the waveform.
///
/// Returns 0 when not even the header fits.
pub fn max_message_len(waveform: &Waveform, options: &EmbedOptions) -> StegoResult<usize> {
    let capacity = capacity_bits(waveform, options)?;
    let bytes = capacity.saturating_sub(HEADER_BITS) / 8;
    Ok(bytes.min(u32::MAX as u64) as usize)
}

fn header_bytes(message_len: u32) -> [u8; 6] {
    let mut header = [0u8; 6];
    header[..2].copy_from_slice(&HEADER_MAGIC.to_be_bytes());
    header[2..].copy_from_slice(&message_len.to_be_bytes());
    header
}

/// Hides `message` in a copy of `waveform`.
///
/// The input is not modified. On success the result has the same format and
/// frame count; only the low `options.lsb_depth` bits of the first
/// `ceil(required_bits / depth)` samples may differ.
///
/// # Errors
/// - [`StegoError::InvalidLsbDepth`] if the depth does not suit the sample width
/// - [`StegoError::CapacityExceeded`] if header plus message do not fit; no
///   sample is written in that case
pub fn encode(waveform: &Waveform, message: &[u8], options: &EmbedOptions) -> StegoResult<Waveform> {
    let capacity = capacity_bits(waveform, options)?;
    let required = required_bits(message.len());

    let length = match u32::try_from(message.len()) {
        Ok(length) if required <= capacity => length,
        _ => {
            return Err(StegoError::CapacityExceeded {
                required_bits: required,
                capacity_bits: capacity,
            })
        }
    };

    let mut stego = waveform.clone();
    let mut writer = LsbWriter::new(stego.samples_mut(), options.lsb_depth);
    let written = writer.write_bytes(&header_bytes(length)) && writer.write_bytes(message);
    debug_assert!(written, "capacity was checked before writing");

    tracing::debug!(
        message_bytes = message.len(),
        bits = writer.bits_written(),
        capacity_bits = capacity,
        lsb_depth = options.lsb_depth,
        "embedded message"
    );

    Ok(stego)
}

/// Extracts a message previously hidden with [`encode`].
///
/// # Errors
/// - [`StegoError::InvalidLsbDepth`] if the depth does not suit the sample width
/// - [`StegoError::TruncatedWaveform`] if the waveform cannot hold a header
/// - [`StegoError::NoHiddenMessage`] if the header magic is missing or the
///   length prefix points past the end of the waveform
pub fn decode(waveform: &Waveform, options: &EmbedOptions) -> StegoResult<Vec<u8>> {
    let capacity = capacity_bits(waveform, options)?;
    if capacity < HEADER_BITS {
        return Err(StegoError::TruncatedWaveform {
            capacity_bits: capacity,
            required_bits: HEADER_BITS,
        });
    }

    let mut reader = LsbReader::new(waveform.samples(), options.lsb_depth);
    let mut header = [0u8; 6];
    reader
        .read_into(&mut header)
        .ok_or(StegoError::NoHiddenMessage)?;

    let magic = u16::from_be_bytes([header[0], header[1]]);
    if magic != HEADER_MAGIC {
        tracing::debug!(magic, "header magic mismatch");
        return Err(StegoError::NoHiddenMessage);
    }

    let length = u32::from_be_bytes([header[2], header[3], header[4], header[5]]);
    if length as u64 * 8 > reader.remaining_bits() {
        tracing::debug!(
            length,
            remaining_bits = reader.remaining_bits(),
            "length prefix exceeds capacity"
        );
        return Err(StegoError::NoHiddenMessage);
    }

    let mut message = vec![0u8; length as usize];
    reader
        .read_into(&mut message)
        .ok_or(StegoError::NoHiddenMessage)?;

    tracing::debug!(message_bytes = message.len(), lsb_depth = options.lsb_depth, "extracted message");
    Ok(message)
}
