//! MurmurHash3 x64/128 mixing.

use std::io::{self, Read};

/// Size of a mixed value in bytes.
pub(crate) const MIXED_SIZE: usize = 16;

/// Fixed seed, so digests are reproducible across processes.
const SEED: u32 = 0;

/// A MurmurHash3 x64/128 accumulator fed from a byte stream.
///
/// Each call to [`Murmur3Mixer::mix`] starts from the seeded initial state
/// and consumes its input to EOF, so no state survives between inputs and
/// one mixer can serve any number of threads.
///
/// The result depends only on the concatenated bytes the reader yields, not
/// on how they are split across `read` calls.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Murmur3Mixer {
    seed: u32,
}

impl Murmur3Mixer {
    /// Creates a mixer with the fixed seed.
    pub(crate) const fn new() -> Self {
        Self { seed: SEED }
    }

    /// Mixes every byte `input` yields, in order, and returns the 16-byte value.
    ///
    /// Bytes are laid out as the two 64-bit lanes `h1`, `h2`, each big-endian.
    pub(crate) fn mix<R: Read>(&self, input: &mut R) -> io::Result<[u8; MIXED_SIZE]> {
        let value = murmur3::murmur3_x64_128(input, self.seed)?;
        Ok(lanes_to_bytes(value))
    }
}

impl Default for Murmur3Mixer {
    fn default() -> Self {
        Self::new()
    }
}

/// `murmur3` packs `h2` in the high and `h1` in the low 64 bits.
fn lanes_to_bytes(value: u128) -> [u8; MIXED_SIZE] {
    let h1 = value as u64;
    let h2 = (value >> 64) as u64;

    let mut out = [0u8; MIXED_SIZE];
    out[..8].copy_from_slice(&h1.to_be_bytes());
    out[8..].copy_from_slice(&h2.to_be_bytes());
    out
}
