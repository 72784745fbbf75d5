//! PCM WAV reader and writer.
//!
//! The codec only works on uncompressed integer PCM, so this module refuses
//! float WAV files rather than converting them. Sample rate, channel count and
//! bit depth survive a read/write round trip unchanged.

mod format;
mod reader;
mod writer;

#[cfg(test)]
mod tests;

// Re-export public API
pub use format::{PcmFormat, SUPPORTED_BIT_DEPTHS};
pub use reader::{read_wav, read_wav_bytes, read_wav_file};
pub use writer::{write_wav, write_wav_file, write_wav_to_vec};
