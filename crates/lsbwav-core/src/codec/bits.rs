//! Bit cursors over the low bits of a sample buffer.
//!
//! Stream bit `k` maps to sample `k / depth`, bit position
//! `depth - 1 - (k % depth)`. Bytes are streamed most-significant bit first.

/// Writes a bit stream into the low bits of samples.
pub(crate) struct LsbWriter<'a> {
    samples: &'a mut [i32],
    depth: u32,
    pos: u64,
}

impl<'a> LsbWriter<'a> {
    pub(crate) fn new(samples: &'a mut [i32], depth: u8) -> Self {
        Self {
            samples,
            depth: depth as u32,
            pos: 0,
        }
    }

    /// Writes one bit. Returns false once the samples are exhausted.
    fn write_bit(&mut self, bit: bool) -> bool {
        let index = (self.pos / self.depth as u64) as usize;
        let Some(sample) = self.samples.get_mut(index) else {
            return false;
        };
        let shift = self.depth - 1 - (self.pos % self.depth as u64) as u32;
        let mask = 1i32 << shift;
        *sample = (*sample & !mask) | ((bit as i32) << shift);
        self.pos += 1;
        true
    }

    /// Writes every byte, MSB first. Returns false if the samples ran out.
    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) -> bool {
        for &byte in bytes {
            for i in (0..8).rev() {
                if !self.write_bit((byte >> i) & 1 == 1) {
                    return false;
                }
            }
        }
        true
    }

    /// Number of bits written so far.
    pub(crate) fn bits_written(&self) -> u64 {
        self.pos
    }
}

/// Reads a bit stream back out of the low bits of samples.
pub(crate) struct LsbReader<'a> {
    samples: &'a [i32],
    depth: u32,
    pos: u64,
}

impl<'a> LsbReader<'a> {
    pub(crate) fn new(samples: &'a [i32], depth: u8) -> Self {
        Self {
            samples,
            depth: depth as u32,
            pos: 0,
        }
    }

    fn read_bit(&mut self) -> Option<u8> {
        let index = (self.pos / self.depth as u64) as usize;
        let sample = *self.samples.get(index)?;
        let shift = self.depth - 1 - (self.pos % self.depth as u64) as u32;
        self.pos += 1;
        Some(((sample >> shift) & 1) as u8)
    }

    /// Reads one byte, MSB first. `None` if the samples ran out.
    pub(crate) fn read_byte(&mut self) -> Option<u8> {
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | self.read_bit()?;
        }
        Some(byte)
    }

    /// Fills `out` with the next bytes. `None` if the samples ran out.
    pub(crate) fn read_into(&mut self, out: &mut [u8]) -> Option<()> {
        for slot in out.iter_mut() {
            *slot = self.read_byte()?;
        }
        Some(())
    }

    /// Bits left before the samples are exhausted.
    pub(crate) fn remaining_bits(&self) -> u64 {
        (self.samples.len() as u64 * self.depth as u64).saturating_sub(self.pos)
    }
}
