//! imohash
//!
//! Fast, constant-time fingerprints for files and buffers.
//!
//! Small inputs are hashed in full. Large inputs are represented by three
//! fixed-size windows (start, middle, end), so hashing a 100 GB file costs
//! about as much as hashing a 48 KiB one. The windows are mixed with
//! MurmurHash3 x64/128 and the exact input length is written over the
//! leading bytes of the result, giving a 16-byte [`Digest`].
//!
//! Good for:
//!
//! - deduplication candidates
//! - change detection
//! - sync and backup tooling
//!
//! Not good for:
//!
//! - anything adversarial: the digest is NOT cryptographic, and whoever
//!   knows the sampling layout can change unsampled bytes at will
//! - streams that cannot seek
//!
//! # Example
//!
//! ```no_run
//! use imohash::{DigestError, ImoHasher};
//!
//! fn main() -> Result<(), DigestError> {
//!     let hasher = ImoHasher::default();
//!
//!     let digest = hasher.sum_file("data.bin")?;
//!     println!("{}  data.bin", digest);
//!
//!     let digest = hasher.sum(b"in memory");
//!     assert_eq!(digest.to_hex().len(), 32);
//!     Ok(())
//! }
//! ```
//!
//! # Custom parameters
//!
//! ```
//! use imohash::{ImoHasher, SampleConfig};
//!
//! // 3-byte windows from 45 bytes up
//! let hasher = ImoHasher::new(SampleConfig::new(3, 45));
//! assert!(hasher.strategy(45).is_sampled());
//!
//! // never sample
//! let hasher = ImoHasher::with_params(0, 45);
//! assert!(!hasher.strategy(1 << 30).is_sampled());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod digest;
mod engine;
mod error;
mod mixer; // internal murmur3 adapter
mod sample;

pub mod manifest;

//
// Public surface
//

use std::io::{Read, Seek};
use std::path::Path;

pub use config::{DEFAULT_SAMPLE_SIZE, DEFAULT_SAMPLE_THRESHOLD, SampleConfig};
pub use digest::{Digest, MAX_UVARINT_LEN, ParseDigestError, encode_uvarint};
pub use engine::ImoHasher;
pub use error::DigestError;
pub use sample::{Strategy, Window};

/// Hashes a buffer with the default parameters.
///
/// Shorthand for `ImoHasher::default().sum(data)`.
pub fn sum(data: &[u8]) -> Digest {
    ImoHasher::default().sum(data)
}

/// Hashes a file with the default parameters.
///
/// Shorthand for `ImoHasher::default().sum_file(path)`.
pub fn sum_file(path: impl AsRef<Path>) -> Result<Digest, DigestError> {
    ImoHasher::default().sum_file(path)
}

/// Hashes the first `len` bytes of a seekable source with the default parameters.
///
/// Shorthand for `ImoHasher::default().sum_source(source, len)`.
pub fn sum_source<R: Read + Seek>(source: &mut R, len: u64) -> Result<Digest, DigestError> {
    ImoHasher::default().sum_source(source, len)
}
