//! WAV encoding of a [`Waveform`].

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use crate::error::StegoResult;
use crate::waveform::Waveform;

/// Writes a waveform as a PCM WAV stream.
///
/// The header is written with the waveform's exact format, so
/// reading the output back yields an identical [`Waveform`].
pub fn write_wav<W: Write + Seek>(writer: W, waveform: &Waveform) -> StegoResult<()> {
    let mut wav = hound::WavWriter::new(writer, waveform.format().into())?;
    for &sample in waveform.samples() {
        wav.write_sample(sample)?;
    }
    wav.finalize()?;
    Ok(())
}

/// Writes a waveform to a byte vector.
pub fn write_wav_to_vec(waveform: &Waveform) -> StegoResult<Vec<u8>> {
    let block = waveform.format().block_align() as usize;
    let data_len = waveform.frame_count().saturating_mul(block);
    let mut buffer = Vec::with_capacity(data_len.saturating_add(44));
    write_wav(Cursor::new(&mut buffer), waveform)?;
    Ok(buffer)
}

/// Writes a waveform to a file, replacing it if it exists.
pub fn write_wav_file(path: &Path, waveform: &Waveform) -> StegoResult<()> {
    let file = File::create(path)?;
    write_wav(BufWriter::new(file), waveform)?;
    tracing::debug!(path = %path.display(), frames = waveform.frame_count(), "wrote WAV");
    Ok(())
}
