//! Tests for the WAV reader and writer.

use pretty_assertions::assert_eq;

use crate::error::StegoError;
use crate::waveform::Waveform;

use super::format::PcmFormat;
use super::reader::{read_wav_bytes, read_wav_file};
use super::writer::{write_wav_file, write_wav_to_vec};

fn ramp(format: PcmFormat, frames: usize) -> Waveform {
    let (min, max) = format.sample_range();
    let span = (max as i64 - min as i64) / (frames.max(2) as i64);
    let samples = (0..frames * format.channels as usize)
        .map(|i| (min as i64 + span * (i % frames.max(1)) as i64) as i32)
        .collect();
    Waveform::new(format, samples).unwrap()
}

/// Hand-assembled 16-bit mono PCM file, the layout most WAV writers emit.
fn minimal_pcm16(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_size = samples.len() * 2;
    let mut wav = Vec::new();
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&((36 + data_size) as u32).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&(data_size as u32).to_le_bytes());
    for s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

// =========================================================================
// PcmFormat tests
// =========================================================================

#[test]
fn test_format_constructors() {
    let mono = PcmFormat::mono(44100);
    assert_eq!(mono.channels, 1);
    assert_eq!(mono.bits_per_sample, 16);

    let stereo = PcmFormat::stereo(48000);
    assert_eq!(stereo.channels, 2);
    assert_eq!(stereo.sample_rate, 48000);
}

#[test]
fn test_block_align_and_byte_rate() {
    let stereo = PcmFormat::stereo(44100);
    assert_eq!(stereo.block_align(), 4);
    assert_eq!(stereo.byte_rate(), 176400);

    let mono24 = PcmFormat::new(1, 48000, 24);
    assert_eq!(mono24.bytes_per_sample(), 3);
    assert_eq!(mono24.byte_rate(), 144000);
}

#[test]
fn test_wide_format_does_not_fit_header() {
    let wide = PcmFormat::new(20_000, 8000, 32);
    assert_eq!(wide.block_align(), 80_000);
    assert_eq!(wide.byte_rate(), 640_000_000);

    let err = wide.validate().unwrap_err();
    assert!(matches!(err, StegoError::UnsupportedFormat { .. }));
    let err = Waveform::silence(wide, 1).unwrap_err();
    assert!(matches!(err, StegoError::UnsupportedFormat { .. }));

    // 16383 * 4 = 65532 still fits the u16 block align field.
    let widest = PcmFormat::new(16_383, 8000, 32);
    let wave = Waveform::silence(widest, 1).unwrap();
    let bytes = write_wav_to_vec(&wave).unwrap();
    assert!(bytes.len() > 16_383 * 4);
}

#[test]
fn test_byte_rate_must_fit_header() {
    let fast = PcmFormat::new(8, u32::MAX, 32);
    assert_eq!(fast.byte_rate(), u32::MAX as u64 * 32);
    assert!(matches!(
        fast.validate(),
        Err(StegoError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_sample_range() {
    assert_eq!(PcmFormat::new(1, 8000, 8).sample_range(), (-128, 127));
    assert_eq!(PcmFormat::mono(8000).sample_range(), (-32768, 32767));
    assert_eq!(
        PcmFormat::new(1, 8000, 24).sample_range(),
        (-8_388_608, 8_388_607)
    );
    assert_eq!(
        PcmFormat::new(1, 8000, 32).sample_range(),
        (i32::MIN, i32::MAX)
    );
}

// =========================================================================
// Reading
// =========================================================================

#[test]
fn test_read_hand_built_file() {
    let bytes = minimal_pcm16(&[0, 1, -1, i16::MAX, i16::MIN], 22050);
    let wave = read_wav_bytes(&bytes).unwrap();
    assert_eq!(wave.format(), PcmFormat::mono(22050));
    assert_eq!(wave.samples(), &[0, 1, -1, 32767, -32768]);
}

#[test]
fn test_read_rejects_garbage() {
    let err = read_wav_bytes(b"definitely not a wav file").unwrap_err();
    assert!(matches!(err, StegoError::Wav(_)));
}

#[test]
fn test_read_rejects_float_wav() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(std::io::Cursor::new(&mut bytes), spec).unwrap();
        writer.write_sample(0.25f32).unwrap();
        writer.finalize().unwrap();
    }

    let err = read_wav_bytes(&bytes).unwrap_err();
    assert!(matches!(err, StegoError::UnsupportedFormat { .. }));
}

// =========================================================================
// Round trips
// =========================================================================

#[test]
fn test_roundtrip_preserves_every_bit_depth() {
    for bits in [8u16, 16, 24, 32] {
        for channels in [1u16, 2] {
            let format = PcmFormat::new(channels, 44100, bits);
            let wave = ramp(format, 64);
            let bytes = write_wav_to_vec(&wave).unwrap();
            let back = read_wav_bytes(&bytes).unwrap();
            assert_eq!(back, wave, "{bits}-bit, {channels} channel(s)");
        }
    }
}

#[test]
fn test_write_header_fields() {
    let wave = ramp(PcmFormat::mono(8000), 10);
    let bytes = write_wav_to_vec(&wave).unwrap();
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");

    let data: Vec<u8> = wave
        .samples()
        .iter()
        .flat_map(|&s| (s as i16).to_le_bytes())
        .collect();
    assert_eq!(&bytes[bytes.len() - data.len()..], &data[..]);
}

#[test]
fn test_empty_waveform_roundtrip() {
    let wave = Waveform::silence(PcmFormat::stereo(48000), 0).unwrap();
    let bytes = write_wav_to_vec(&wave).unwrap();
    let back = read_wav_bytes(&bytes).unwrap();
    assert_eq!(back.frame_count(), 0);
    assert_eq!(back.format(), wave.format());
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ramp.wav");
    let wave = ramp(PcmFormat::stereo(32000), 100);

    write_wav_file(&path, &wave).unwrap();
    let back = read_wav_file(&path).unwrap();
    assert_eq!(back, wave);
    assert_eq!(back.pcm_hash(), wave.pcm_hash());
}

#[test]
fn test_read_missing_file() {
    let err = read_wav_file(std::path::Path::new("/nonexistent/cover.wav")).unwrap_err();
    assert!(matches!(err, StegoError::Io(_)));
}
