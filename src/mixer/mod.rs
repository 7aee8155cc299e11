//! 128-bit content mixing.
//!
//! The mixer turns the bytes selected for an input into a 16-byte value.
//! It is a non-cryptographic hash; see the crate docs for what that means
//! for collision resistance.
//!
//! - [`Murmur3Mixer`] - MurmurHash3 x64/128, seed 0

mod murmur;

pub(crate) use self::murmur::{MIXED_SIZE, Murmur3Mixer};
