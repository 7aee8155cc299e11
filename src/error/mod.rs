//! Error types for imohash.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while computing a digest from a file or source.
///
/// Hashing an in-memory buffer never fails, so [`crate::ImoHasher::sum`]
/// has no error channel.
#[derive(Debug)]
pub enum DigestError {
    /// Opening or stat-ing a file failed.
    Open {
        /// The path that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A seek or read on the input failed.
    Read {
        /// The file being hashed, when known.
        path: Option<PathBuf>,
        /// Byte offset at which the failing operation was issued.
        offset: u64,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The input ended before a region selected for hashing was fully read.
    ShortRead {
        /// The file being hashed, when known.
        path: Option<PathBuf>,
        /// Start offset of the region.
        offset: u64,
        /// Bytes the region should contain.
        expected: u64,
        /// Bytes actually available.
        actual: u64,
    },
}

impl DigestError {
    /// Attaches `path` to errors raised while reading an already-open source.
    pub(crate) fn with_path(self, path: &Path) -> Self {
        match self {
            DigestError::Read { offset, source, .. } => DigestError::Read {
                path: Some(path.to_path_buf()),
                offset,
                source,
            },
            DigestError::ShortRead {
                offset,
                expected,
                actual,
                ..
            } => DigestError::ShortRead {
                path: Some(path.to_path_buf()),
                offset,
                expected,
                actual,
            },
            other => other,
        }
    }

    /// Returns the path this error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            DigestError::Open { path, .. } => Some(path),
            DigestError::Read { path, .. } | DigestError::ShortRead { path, .. } => {
                path.as_deref()
            }
        }
    }

    /// Returns `true` for [`DigestError::ShortRead`].
    pub fn is_short_read(&self) -> bool {
        matches!(self, DigestError::ShortRead { .. })
    }
}

impl fmt::Display for DigestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestError::Open { path, source } => {
                write!(f, "cannot open '{}': {}", path.display(), source)
            }
            DigestError::Read {
                path: Some(path),
                offset,
                source,
            } => write!(
                f,
                "read error in '{}' at offset {}: {}",
                path.display(),
                offset,
                source
            ),
            DigestError::Read {
                path: None,
                offset,
                source,
            } => write!(f, "read error at offset {}: {}", offset, source),
            DigestError::ShortRead {
                path,
                offset,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "short read at offset {}: expected {} bytes, got {}",
                    offset, expected, actual
                )?;
                if let Some(path) = path {
                    write!(f, " (in '{}')", path.display())?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for DigestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DigestError::Open { source, .. } | DigestError::Read { source, .. } => Some(source),
            DigestError::ShortRead { .. } => None,
        }
    }
}
