//! The digest engine.

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use tracing::trace;

use super::reader::RegionReader;
use crate::config::SampleConfig;
use crate::digest::{Digest, assemble};
use crate::error::DigestError;
use crate::mixer::Murmur3Mixer;
use crate::sample::{Strategy, Window};

/// Computes sampled digests of buffers, files and seekable sources.
///
/// An `ImoHasher` holds only its immutable [`SampleConfig`]. Every call
/// builds its own mixing state, so one hasher can be shared freely, across
/// threads included.
///
/// For a given configuration and content, [`sum`](Self::sum),
/// [`sum_file`](Self::sum_file) and [`sum_source`](Self::sum_source) agree
/// bit for bit.
///
/// # Example
///
/// ```
/// use imohash::ImoHasher;
///
/// let hasher = ImoHasher::with_params(3, 45);
/// let digest = hasher.sum(b"hello");
/// assert_eq!(digest.to_hex(), "05d8a7b341bd9b025b1e906a48ae1d19");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ImoHasher {
    config: SampleConfig,
    mixer: Murmur3Mixer,
}

impl ImoHasher {
    /// Creates a hasher with the given configuration.
    pub fn new(config: SampleConfig) -> Self {
        Self {
            config,
            mixer: Murmur3Mixer::new(),
        }
    }

    /// Creates a hasher from a window size and threshold.
    ///
    /// A `sample_size` of zero means every input is hashed in full.
    pub fn with_params(sample_size: usize, sample_threshold: usize) -> Self {
        Self::new(SampleConfig::new(sample_size, sample_threshold))
    }

    /// Returns the configuration used by this hasher.
    pub fn config(&self) -> &SampleConfig {
        &self.config
    }

    /// Returns how an input of `len` bytes would be read.
    pub fn strategy(&self, len: u64) -> Strategy {
        self.config.strategy(len)
    }

    /// Hashes an in-memory buffer.
    pub fn sum(&self, data: &[u8]) -> Digest {
        // A cursor over a slice of the stated length cannot fail or come up short.
        self.sum_source(&mut Cursor::new(data), data.len() as u64)
            .expect("hashing an in-memory buffer cannot fail")
    }

    /// Hashes the file at `path`.
    ///
    /// The length is taken from the file's metadata when it is opened. The
    /// file is closed before returning, on success and on error.
    ///
    /// # Errors
    ///
    /// - [`DigestError::Open`] if the file cannot be opened or stat-ed
    /// - [`DigestError::Read`] if a seek or read fails
    /// - [`DigestError::ShortRead`] if the file shrank while being hashed
    pub fn sum_file(&self, path: impl AsRef<Path>) -> Result<Digest, DigestError> {
        let path = path.as_ref();
        let open_error = |source| DigestError::Open {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(open_error)?;
        let len = file.metadata().map_err(open_error)?.len();
        trace!(path = %path.display(), len, "hashing file");

        self.sum_source(&mut file, len)
            .map_err(|err| err.with_path(path))
    }

    /// Hashes the first `len` bytes of a seekable source.
    ///
    /// Positions are absolute: byte 0 is the start of `source`, whatever its
    /// current position. Bytes past `len` are never mixed. The source is
    /// left at an unspecified position.
    ///
    /// # Errors
    ///
    /// - [`DigestError::Read`] if a seek or read fails
    /// - [`DigestError::ShortRead`] if `source` ends before a selected
    ///   region (the whole input, or a sample window) was read in full
    pub fn sum_source<R: Read + Seek>(
        &self,
        source: &mut R,
        len: u64,
    ) -> Result<Digest, DigestError> {
        let strategy = self.config.strategy(len);
        let whole = [Window { offset: 0, len }];
        let regions: &[Window] = match &strategy {
            Strategy::Full => &whole,
            Strategy::Sampled(windows) => windows,
        };
        trace!(
            len,
            sampled = strategy.is_sampled(),
            mixed = strategy.mixed_len(len),
            ?regions,
            "selected regions"
        );

        let mut reader = RegionReader::new(source, regions);
        let mixed = match self.mixer.mix(&mut reader) {
            Ok(mixed) => mixed,
            Err(err) => return Err(reader.into_error(err)),
        };

        Ok(assemble(mixed, len))
    }
}

impl Default for ImoHasher {
    fn default() -> Self {
        Self::new(SampleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, SeekFrom};

    #[test]
    fn test_hasher_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ImoHasher>();
    }

    #[test]
    fn test_default_config() {
        assert_eq!(*ImoHasher::default().config(), SampleConfig::default());
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(ImoHasher::default().sum(b""), Digest::default());
    }

    #[test]
    fn test_small_buffer_vector() {
        let hasher = ImoHasher::with_params(3, 45);
        assert_eq!(
            hasher.sum(b"hello").to_hex(),
            "05d8a7b341bd9b025b1e906a48ae1d19"
        );
    }

    #[test]
    fn test_source_position_is_ignored() {
        let hasher = ImoHasher::with_params(3, 45);
        let data = vec![b'A'; 45];

        let mut cursor = Cursor::new(data.clone());
        cursor.seek(SeekFrom::Start(30)).unwrap();
        assert_eq!(hasher.sum_source(&mut cursor, 45).unwrap(), hasher.sum(&data));
    }

    #[test]
    fn test_source_longer_than_len() {
        let hasher = ImoHasher::with_params(3, 45);
        let mut data = b"hello".to_vec();
        let expected = hasher.sum(&data);

        data.extend_from_slice(b" world");
        let digest = hasher.sum_source(&mut Cursor::new(data), 5).unwrap();
        assert_eq!(digest, expected);
    }

    #[test]
    fn test_full_read_shorter_than_len() {
        let hasher = ImoHasher::default();
        let err = hasher
            .sum_source(&mut Cursor::new(b"hello".to_vec()), 10)
            .unwrap_err();

        match err {
            DigestError::ShortRead {
                offset,
                expected,
                actual,
                path,
            } => {
                assert_eq!((offset, expected, actual), (0, 10, 5));
                assert!(path.is_none());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sampled_window_shorter_than_len() {
        let hasher = ImoHasher::with_params(3, 45);
        // claims 45 bytes, holds 43: the end window [42, 45) comes up short
        let err = hasher
            .sum_source(&mut Cursor::new(vec![b'A'; 43]), 45)
            .unwrap_err();

        match err {
            DigestError::ShortRead {
                offset,
                expected,
                actual,
                ..
            } => {
                assert_eq!((offset, expected, actual), (42, 3, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_seek_failure_is_read_error() {
        struct NoSeek(Cursor<Vec<u8>>);

        impl Read for NoSeek {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                self.0.read(buf)
            }
        }

        impl Seek for NoSeek {
            fn seek(&mut self, _: SeekFrom) -> io::Result<u64> {
                Err(io::Error::from(io::ErrorKind::Unsupported))
            }
        }

        let hasher = ImoHasher::default();
        let err = hasher
            .sum_source(&mut NoSeek(Cursor::new(vec![0u8; 10])), 10)
            .unwrap_err();
        assert!(matches!(err, DigestError::Read { offset: 0, .. }));
    }
}
