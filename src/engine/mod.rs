//! Digest engine.
//!
//! - [`ImoHasher`] - selects regions, mixes them and assembles the digest
//!
//! Data flows one way: the sample selector picks the regions, the mixer
//! consumes them in order, the assembler stamps the length.

mod hasher;
mod reader;

pub use hasher::ImoHasher;
