//! lsbwav core
//!
//! Hides a byte message in the least-significant bits of uncompressed PCM
//! audio and extracts it again.
//!
//! # Overview
//!
//! - A WAV file is read fully into a [`Waveform`] (interleaved integer samples
//!   plus format metadata).
//! - [`codec::encode`] returns a new waveform whose low bits carry a header
//!   (magic + length prefix) followed by the message.
//! - [`codec::decode`] reads the header back and returns exactly the embedded
//!   bytes, or [`StegoError::NoHiddenMessage`] if there is nothing consistent.
//! - Compressed inputs (MP3, FLAC, ...) are converted to PCM WAV first by the
//!   [`transcode`] module, which shells out to ffmpeg.
//!
//! Every call is self-contained: there is no global state, so distinct
//! waveforms can be processed on different threads without coordination.
//!
//! # Example
//!
//! ```no_run
//! use lsbwav_core::codec::{decode, encode, EmbedOptions};
//! use lsbwav_core::wav::{read_wav_file, write_wav_file};
//! use std::path::Path;
//!
//! let cover = read_wav_file(Path::new("cover.wav"))?;
//! let options = EmbedOptions::default();
//! let stego = encode(&cover, "meet at noon".as_bytes(), &options)?;
//! write_wav_file(Path::new("stego.wav"), &stego)?;
//!
//! let hidden = decode(&read_wav_file(Path::new("stego.wav"))?, &options)?;
//! assert_eq!(hidden, b"meet at noon");
//! # Ok::<(), lsbwav_core::StegoError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`codec`] - LSB encode/decode and capacity math
//! - [`error`] - Error taxonomy with stable codes
//! - [`transcode`] - ffmpeg wrapper producing PCM WAV
//! - [`wav`] - PCM WAV reader and writer
//! - [`waveform`] - In-memory waveform model

pub mod codec;
pub mod error;
pub mod transcode;
pub mod wav;
pub mod waveform;

// Re-export main types at crate root
pub use codec::{decode, encode, EmbedOptions};
pub use error::{StegoError, StegoResult};
pub use transcode::{TranscodedWav, Transcoder, TranscoderConfig};
pub use wav::PcmFormat;
pub use waveform::Waveform;
