//! Digest types.
//!
//! - [`Digest`] - 16-byte fingerprint
//! - [`encode_uvarint`] - LEB128 length encoding stamped into each digest

mod assembler;
mod value;

pub(crate) use assembler::assemble;
pub use assembler::{MAX_UVARINT_LEN, encode_uvarint};
pub use value::{Digest, ParseDigestError};
