//! Checksum manifests.
//!
//! A manifest is a list of `<hex-digest>  <path>` lines, the format printed
//! by `imosum`. Checking a manifest re-hashes every listed file and compares
//! the result with the recorded digest.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use imohash::{ImoHasher, manifest};
//!
//! let hasher = ImoHasher::default();
//! let input = Cursor::new("not a manifest line\n");
//!
//! let summary = manifest::check(&hasher, input, |_| {})?;
//! assert_eq!(summary.malformed, 1);
//! assert_eq!(summary.failed, 0);
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::digest::Digest;
use crate::engine::ImoHasher;
use crate::error::DigestError;

/// Separator between digest and path.
pub const SEPARATOR: &str = "  ";

/// Formats one manifest line (without the trailing newline).
pub fn format_line(digest: &Digest, path: &Path) -> String {
    format!("{}{}{}", digest, SEPARATOR, path.display())
}

/// A well-formed manifest line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestEntry<'a> {
    /// Recorded digest, as written.
    pub expected: &'a str,

    /// Path of the file to check.
    pub path: &'a str,
}

/// Splits a line at the first [`SEPARATOR`].
///
/// Returns `None` for lines without one. The digest text is not validated
/// here; a bad digest simply fails to match.
pub fn parse_line(line: &str) -> Option<ManifestEntry<'_>> {
    let (expected, path) = line.split_once(SEPARATOR)?;
    Some(ManifestEntry { expected, path })
}

/// Result of checking one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// The recomputed digest matches.
    Ok,

    /// The digest differs, or the file could not be hashed.
    Failed,
}

impl CheckStatus {
    /// Returns the label printed for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "OK",
            CheckStatus::Failed => "FAILED",
        }
    }
}

/// Outcome for one manifest entry.
#[derive(Debug)]
pub struct CheckOutcome {
    /// The checked path, as listed in the manifest.
    pub path: PathBuf,

    /// Whether it matched.
    pub status: CheckStatus,

    /// The hashing error, if the file could not be hashed.
    pub error: Option<DigestError>,
}

/// Counts for one checked manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Entries checked.
    pub checked: usize,

    /// Entries that did not match or could not be hashed.
    pub failed: usize,

    /// Lines skipped for lack of a separator.
    pub malformed: usize,
}

impl CheckSummary {
    /// Returns `true` if no entry failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Folds another manifest's counts into this one.
    pub fn merge(&mut self, other: CheckSummary) {
        self.checked += other.checked;
        self.failed += other.failed;
        self.malformed += other.malformed;
    }

    /// Warning text for failed entries, if any failed.
    pub fn mismatch_warning(&self) -> Option<String> {
        match self.failed {
            0 => None,
            1 => Some("1 computed checksum did NOT match".to_string()),
            n => Some(format!("{} computed checksums did NOT match", n)),
        }
    }

    /// Warning text for malformed lines, if there were any.
    pub fn malformed_warning(&self) -> Option<String> {
        match self.malformed {
            0 => None,
            1 => Some("1 line is improperly formatted".to_string()),
            n => Some(format!("{} lines are improperly formatted", n)),
        }
    }
}

/// Checks every entry of a manifest read from `reader`.
///
/// `on_outcome` is called once per well-formed line, in manifest order, as
/// soon as that entry is checked. Relative paths resolve against the
/// current directory.
///
/// # Errors
///
/// Only failures reading the manifest itself are returned; files that
/// cannot be hashed are reported as [`CheckStatus::Failed`].
pub fn check<R, F>(hasher: &ImoHasher, reader: R, mut on_outcome: F) -> io::Result<CheckSummary>
where
    R: BufRead,
    F: FnMut(&CheckOutcome),
{
    let mut summary = CheckSummary::default();

    for line in reader.split(b'\n') {
        let line = line?;
        let line = line.strip_suffix(b"\r").unwrap_or(&line[..]);
        let line = String::from_utf8_lossy(line);

        let Some(entry) = parse_line(&line) else {
            summary.malformed += 1;
            continue;
        };

        let outcome = check_entry(hasher, &entry);
        summary.checked += 1;
        if outcome.status == CheckStatus::Failed {
            summary.failed += 1;
        }
        on_outcome(&outcome);
    }

    Ok(summary)
}

fn check_entry(hasher: &ImoHasher, entry: &ManifestEntry<'_>) -> CheckOutcome {
    let path = PathBuf::from(entry.path);

    match hasher.sum_file(&path) {
        Ok(digest) => {
            let status = if digest.to_hex() == entry.expected {
                CheckStatus::Ok
            } else {
                debug!(path = entry.path, expected = entry.expected, actual = %digest, "digest mismatch");
                CheckStatus::Failed
            };
            CheckOutcome {
                path,
                status,
                error: None,
            }
        }
        Err(err) => {
            debug!(path = entry.path, error = %err, "cannot hash manifest entry");
            CheckOutcome {
                path,
                status: CheckStatus::Failed,
                error: Some(err),
            }
        }
    }
}
