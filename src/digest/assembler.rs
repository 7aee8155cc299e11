//! Digest assembly: stamping the input length over the mixed value.

use super::Digest;
use crate::mixer::MIXED_SIZE;

/// Maximum number of bytes [`encode_uvarint`] writes for a `u64`.
pub const MAX_UVARINT_LEN: usize = 10;

/// Writes `value` as an unsigned LEB128 varint to the front of `buf`.
///
/// Seven bits per byte, least significant group first, high bit set on
/// every byte but the last. Returns the number of bytes written: 1 for
/// values below 128, up to [`MAX_UVARINT_LEN`] for `u64::MAX`.
///
/// # Panics
///
/// Panics if `buf` is too short for the encoding.
///
/// # Example
///
/// ```
/// use imohash::encode_uvarint;
///
/// let mut buf = [0u8; 10];
/// let n = encode_uvarint(300, &mut buf);
/// assert_eq!(&buf[..n], &[0xac, 0x02]);
/// ```
pub fn encode_uvarint(mut value: u64, buf: &mut [u8]) -> usize {
    let mut i = 0;
    while value >= 0x80 {
        buf[i] = (value as u8) | 0x80;
        value >>= 7;
        i += 1;
    }
    buf[i] = value as u8;
    i + 1
}

/// Overwrites the leading bytes of `mixed` with the varint of `len`.
///
/// The trailing bytes are left untouched, so very large inputs keep fewer
/// content-derived bits.
pub(crate) fn assemble(mut mixed: [u8; MIXED_SIZE], len: u64) -> Digest {
    encode_uvarint(len, &mut mixed);
    Digest::new(mixed)
}
