//! Tests for the LSB codec.

use pretty_assertions::assert_eq;

use crate::error::StegoError;
use crate::wav::PcmFormat;
use crate::waveform::Waveform;

use super::*;

/// Deterministic non-trivial carrier: a sawtooth with odd and even samples.
fn carrier(format: PcmFormat, frames: usize) -> Waveform {
    let (min, max) = format.sample_range();
    let samples = (0..frames * format.channels as usize)
        .map(|i| ((i as i64 * 7919) % (max as i64 - min as i64) + min as i64) as i32)
        .collect();
    Waveform::new(format, samples).unwrap()
}

// =========================================================================
// Round trips
// =========================================================================

#[test]
fn test_hello_scenario() {
    let cover = Waveform::silence(PcmFormat::mono(8000), 8000).unwrap();
    let options = EmbedOptions::default();

    let stego = encode(&cover, b"HELLO", &options).unwrap();
    assert_eq!(decode(&stego, &options).unwrap(), b"HELLO".to_vec());

    let err = decode(&cover, &options).unwrap_err();
    assert!(matches!(err, StegoError::NoHiddenMessage));
}

#[test]
fn test_empty_message_roundtrip() {
    let cover = carrier(PcmFormat::mono(8000), 100);
    let options = EmbedOptions::default();
    let stego = encode(&cover, b"", &options).unwrap();
    assert_eq!(decode(&stego, &options).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_single_byte_roundtrip() {
    let cover = carrier(PcmFormat::stereo(44100), 40);
    let options = EmbedOptions::default();
    let stego = encode(&cover, &[0x00], &options).unwrap();
    assert_eq!(decode(&stego, &options).unwrap(), vec![0x00]);
}

#[test]
fn test_message_containing_zero_bytes() {
    let cover = carrier(PcmFormat::mono(8000), 400);
    let options = EmbedOptions::default();
    let message = b"a\0b\0\0c".to_vec();
    let stego = encode(&cover, &message, &options).unwrap();
    assert_eq!(decode(&stego, &options).unwrap(), message);
}

#[test]
fn test_every_depth_and_width() {
    let message = b"The quick brown fox".to_vec();
    for bits in [8u16, 16, 24, 32] {
        for depth in 1..=MAX_LSB_DEPTH {
            let format = PcmFormat::new(2, 22050, bits);
            let cover = carrier(format, 200);
            let options = EmbedOptions::with_depth(depth);
            let stego = encode(&cover, &message, &options).unwrap();
            assert_eq!(
                decode(&stego, &options).unwrap(),
                message,
                "{bits}-bit samples, depth {depth}"
            );
        }
    }
}

#[test]
fn test_maximum_capacity_message() {
    let cover = carrier(PcmFormat::mono(8000), 1000);
    let options = EmbedOptions::default();
    let max = max_message_len(&cover, &options).unwrap();
    assert_eq!(max, (1000 - 48) / 8);

    let message: Vec<u8> = (0..max).map(|i| (i * 31) as u8).collect();
    let stego = encode(&cover, &message, &options).unwrap();
    assert_eq!(decode(&stego, &options).unwrap(), message);

    let too_big = vec![0u8; max + 1];
    assert!(matches!(
        encode(&cover, &too_big, &options),
        Err(StegoError::CapacityExceeded { .. })
    ));
}

// =========================================================================
// Capacity
// =========================================================================

#[test]
fn test_required_bits() {
    assert_eq!(required_bits(0), 48);
    assert_eq!(required_bits(5), 88);
}

#[test]
fn test_capacity_scales_with_depth() {
    let cover = Waveform::silence(PcmFormat::stereo(8000), 100).unwrap();
    assert_eq!(capacity_bits(&cover, &EmbedOptions::default()).unwrap(), 200);
    assert_eq!(capacity_bits(&cover, &EmbedOptions::with_depth(3)).unwrap(), 600);
}

#[test]
fn test_exact_capacity_boundary() {
    let options = EmbedOptions::default();
    let message = b"HELLO";

    // 48 header bits + 40 message bits.
    let exact = carrier(PcmFormat::mono(8000), 88);
    let stego = encode(&exact, message, &options).unwrap();
    assert_eq!(decode(&stego, &options).unwrap(), message.to_vec());

    let short = carrier(PcmFormat::mono(8000), 87);
    match encode(&short, message, &options) {
        Err(StegoError::CapacityExceeded {
            required_bits,
            capacity_bits,
        }) => {
            assert_eq!(required_bits, 88);
            assert_eq!(capacity_bits, 87);
        }
        other => panic!("expected CapacityExceeded, got {other:?}"),
    }
}

#[test]
fn test_boundary_with_partial_last_sample() {
    // 88 bits at depth 3 need 29.3 samples; 30 is enough, 29 is not.
    let options = EmbedOptions::with_depth(3);
    let fits = carrier(PcmFormat::mono(8000), 30);
    assert!(encode(&fits, b"HELLO", &options).is_ok());
    let short = carrier(PcmFormat::mono(8000), 29);
    assert!(encode(&short, b"HELLO", &options).is_err());
}

#[test]
fn test_max_message_len_when_header_does_not_fit() {
    let tiny = Waveform::silence(PcmFormat::mono(8000), 10).unwrap();
    assert_eq!(max_message_len(&tiny, &EmbedOptions::default()).unwrap(), 0);
}

// =========================================================================
// Non-mutation guarantees
// =========================================================================

#[test]
fn test_samples_after_payload_are_untouched() {
    let cover = carrier(PcmFormat::stereo(44100), 500);
    let options = EmbedOptions::default();
    let stego = encode(&cover, b"payload", &options).unwrap();

    let used = required_bits(7) as usize;
    assert_eq!(&stego.samples()[used..], &cover.samples()[used..]);
    for (a, b) in cover.samples()[..used].iter().zip(&stego.samples()[..used]) {
        assert_eq!(a >> 1, b >> 1, "only the lowest bit may change");
    }
}

#[test]
fn test_partial_sample_keeps_unused_low_bits() {
    let format = PcmFormat::mono(8000);
    let cover = Waveform::new(format, vec![0b111; 40]).unwrap();
    let options = EmbedOptions::with_depth(3);
    let stego = encode(&cover, b"", &options).unwrap();

    // 48 bits at depth 3 fill exactly 16 samples.
    assert_eq!(&stego.samples()[16..], &cover.samples()[16..]);
    let stego = encode(&cover, b"x", &options).unwrap();
    // 56 bits: sample 18 carries two payload bits, its lowest bit is untouched.
    assert_eq!(stego.samples()[18] & 1, 1);
    assert_eq!(&stego.samples()[19..], &cover.samples()[19..]);
}

#[test]
fn test_encode_does_not_mutate_input() {
    let cover = carrier(PcmFormat::mono(8000), 300);
    let snapshot = cover.clone();
    let _ = encode(&cover, b"hidden", &EmbedOptions::default()).unwrap();
    assert_eq!(cover, snapshot);
}

#[test]
fn test_metadata_preserved() {
    let cover = carrier(PcmFormat::new(2, 96000, 24), 300);
    let stego = encode(&cover, b"meta", &EmbedOptions::with_depth(2)).unwrap();
    assert_eq!(stego.format(), cover.format());
    assert_eq!(stego.frame_count(), cover.frame_count());
}

// =========================================================================
// Decode failures
// =========================================================================

#[test]
fn test_decode_truncated_waveform() {
    let tiny = carrier(PcmFormat::mono(8000), 47);
    match decode(&tiny, &EmbedOptions::default()) {
        Err(StegoError::TruncatedWaveform {
            capacity_bits,
            required_bits,
        }) => {
            assert_eq!(capacity_bits, 47);
            assert_eq!(required_bits, HEADER_BITS);
        }
        other => panic!("expected TruncatedWaveform, got {other:?}"),
    }
}

#[test]
fn test_decode_rejects_length_past_end() {
    // Valid magic, length prefix of 1000 bytes in a 100-sample carrier.
    let cover = carrier(PcmFormat::mono(8000), 100);
    let mut forged = cover.clone();
    let mut writer = bits::LsbWriter::new(forged.samples_mut(), 1);
    writer.write_bytes(&header_bytes(1000));

    assert!(matches!(
        decode(&forged, &EmbedOptions::default()),
        Err(StegoError::NoHiddenMessage)
    ));
}

#[test]
fn test_decode_with_wrong_depth_fails() {
    let cover = carrier(PcmFormat::mono(8000), 2000);
    let stego = encode(&cover, b"depth matters", &EmbedOptions::with_depth(2)).unwrap();
    assert!(decode(&stego, &EmbedOptions::default()).is_err());
}

#[test]
fn test_invalid_depths() {
    let cover = carrier(PcmFormat::new(1, 8000, 8), 100);
    for depth in [0u8, MAX_LSB_DEPTH + 1] {
        let options = EmbedOptions::with_depth(depth);
        assert!(matches!(
            encode(&cover, b"x", &options),
            Err(StegoError::InvalidLsbDepth { .. })
        ));
        assert!(matches!(
            decode(&cover, &options),
            Err(StegoError::InvalidLsbDepth { .. })
        ));
    }
}

#[test]
fn test_depth_must_leave_a_high_bit() {
    let options = EmbedOptions::with_depth(4);
    assert!(options.validate_for(8).is_ok());
    assert!(options.validate_for(4).is_err());
    assert!(EmbedOptions::default().validate_for(16).is_ok());
}
