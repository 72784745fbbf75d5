//! lsbwav CLI library.
//!
//! This crate provides the functionality behind the `lsbwav` binary: loading
//! audio inputs (WAV directly, MP3/FLAC through ffmpeg), configuration, and the
//! encode/decode/capacity/inspect/doctor commands.

pub mod commands;
pub mod config;
pub mod input;
