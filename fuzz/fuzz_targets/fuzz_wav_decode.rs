#![no_main]

use libfuzzer_sys::fuzz_target;
use lsbwav_core::codec::MAX_LSB_DEPTH;
use lsbwav_core::wav::read_wav_bytes;
use lsbwav_core::{decode, EmbedOptions};

// Arbitrary bytes must never panic the WAV reader or the decoder.
fuzz_target!(|data: &[u8]| {
    if let Ok(waveform) = read_wav_bytes(data) {
        for depth in 1..=MAX_LSB_DEPTH {
            let _ = decode(&waveform, &EmbedOptions::with_depth(depth));
        }
    }
});
