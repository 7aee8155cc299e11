//! Sampling parameters.
//!
//! [`SampleConfig`] decides how much of an input is read:
//!
//! - inputs shorter than the sample threshold are hashed in full
//! - longer inputs are represented by three windows of `sample_size` bytes
//!   (start, middle, end)
//!
//! # Example
//!
//! ```
//! use imohash::{SampleConfig, Strategy};
//!
//! let config = SampleConfig::default();
//! assert_eq!(config.sample_size(), 16 * 1024);
//!
//! // Small inputs are read entirely.
//! assert_eq!(config.strategy(1024), Strategy::Full);
//!
//! // Sampling can be switched off.
//! let config = SampleConfig::new(0, 128 * 1024);
//! assert!(config.sampling_disabled());
//! assert_eq!(config.strategy(u64::MAX), Strategy::Full);
//! ```

use crate::sample::{self, Strategy};

/// Default size of each sample window (16 KiB).
pub const DEFAULT_SAMPLE_SIZE: usize = 16 * 1024;

/// Default minimum input length for sampling (128 KiB).
pub const DEFAULT_SAMPLE_THRESHOLD: usize = 128 * 1024;

/// Parameters controlling when and how inputs are sampled.
///
/// A `sample_size` of zero disables sampling: every input is hashed in full
/// regardless of its length.
///
/// Digests are only comparable between hashers using the same parameters.
///
/// # Example
///
/// ```
/// use imohash::SampleConfig;
///
/// let config = SampleConfig::default()
///     .with_sample_size(3)
///     .with_sample_threshold(45);
///
/// assert_eq!(config.sample_size(), 3);
/// assert_eq!(config.sample_threshold(), 45);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleConfig {
    /// Size of each of the three sample windows, in bytes.
    sample_size: usize,

    /// Inputs shorter than this are hashed in full.
    sample_threshold: usize,
}

impl SampleConfig {
    /// Creates a configuration with the given window size and threshold.
    ///
    /// # Arguments
    ///
    /// * `sample_size` - Bytes per sample window; `0` disables sampling
    /// * `sample_threshold` - Minimum input length at which sampling is considered
    pub const fn new(sample_size: usize, sample_threshold: usize) -> Self {
        Self {
            sample_size,
            sample_threshold,
        }
    }

    /// Sets the sample window size.
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = size;
        self
    }

    /// Sets the sample threshold.
    pub fn with_sample_threshold(mut self, threshold: usize) -> Self {
        self.sample_threshold = threshold;
        self
    }

    /// Returns the sample window size.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Returns the sample threshold.
    pub fn sample_threshold(&self) -> usize {
        self.sample_threshold
    }

    /// Returns `true` if every input is hashed in full.
    pub fn sampling_disabled(&self) -> bool {
        self.sample_size < 1
    }

    /// Chooses how an input of `len` bytes is read.
    ///
    /// See [`Strategy`] for the window layout.
    pub fn strategy(&self, len: u64) -> Strategy {
        sample::select(self.sample_size as u64, self.sample_threshold as u64, len)
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_SIZE, DEFAULT_SAMPLE_THRESHOLD)
    }
}
