//! Reader that presents selected regions of a seekable source as one stream.

use std::io::{self, BufReader, Read, Seek, SeekFrom};

use tracing::debug;

use crate::error::DigestError;
use crate::sample::Window;

/// Upper bound on the read-ahead buffer.
const MAX_BUFFER_SIZE: usize = 64 * 1024;

/// Streams the bytes of `windows`, in order, out of `source`.
///
/// Each window starts with an absolute seek, so windows may overlap or
/// repeat. A window that cannot be read in full is a [`DigestError::ShortRead`];
/// I/O failures become [`DigestError::Read`]. Either way the typed error is
/// kept in the reader and the stream itself returns an opaque `io::Error`.
pub(super) struct RegionReader<'a, R> {
    source: BufReader<&'a mut R>,
    windows: &'a [Window],
    current: usize,
    remaining: u64,
    positioned: bool,
    failure: Option<DigestError>,
}

impl<'a, R: Read + Seek> RegionReader<'a, R> {
    pub(super) fn new(source: &'a mut R, windows: &'a [Window]) -> Self {
        let largest = windows.iter().map(|w| w.len).max().unwrap_or(0);
        let capacity = largest.min(MAX_BUFFER_SIZE as u64) as usize;

        Self {
            source: BufReader::with_capacity(capacity, source),
            windows,
            current: 0,
            remaining: 0,
            positioned: false,
            failure: None,
        }
    }

    /// Converts a failed mixing pass into the typed error that caused it.
    pub(super) fn into_error(self, err: io::Error) -> DigestError {
        match self.failure {
            Some(failure) => failure,
            None => DigestError::Read {
                path: None,
                offset: self.position(),
                source: err,
            },
        }
    }

    /// Offset of the next byte to be read from the current window.
    fn position(&self) -> u64 {
        match self.windows.get(self.current) {
            Some(window) if self.positioned => window.end() - self.remaining,
            Some(window) => window.offset,
            None => self.windows.last().map_or(0, Window::end),
        }
    }

    fn fail(&mut self, err: DigestError) -> io::Error {
        let message = err.to_string();
        self.failure = Some(err);
        io::Error::other(message)
    }
}

impl<R: Read + Seek> Read for RegionReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let Some(window) = self.windows.get(self.current).copied() else {
                return Ok(0);
            };

            if !self.positioned {
                if window.len > 0 {
                    if let Err(source) = self.source.seek(SeekFrom::Start(window.offset)) {
                        return Err(self.fail(DigestError::Read {
                            path: None,
                            offset: window.offset,
                            source,
                        }));
                    }
                }
                self.positioned = true;
                self.remaining = window.len;
            }

            if self.remaining == 0 {
                self.current += 1;
                self.positioned = false;
                continue;
            }

            if buf.is_empty() {
                return Ok(0);
            }

            let want = (buf.len() as u64).min(self.remaining) as usize;
            match self.source.read(&mut buf[..want]) {
                Ok(0) => {
                    let actual = window.len - self.remaining;
                    debug!(
                        offset = window.offset,
                        expected = window.len,
                        actual,
                        "input ended inside a hashed region"
                    );
                    return Err(self.fail(DigestError::ShortRead {
                        path: None,
                        offset: window.offset,
                        expected: window.len,
                        actual,
                    }));
                }
                Ok(n) => {
                    self.remaining -= n as u64;
                    return Ok(n);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    let offset = window.end() - self.remaining;
                    return Err(self.fail(DigestError::Read {
                        path: None,
                        offset,
                        source,
                    }));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drain<R: Read + Seek>(source: &mut R, windows: &[Window]) -> Result<Vec<u8>, DigestError> {
        let mut reader = RegionReader::new(source, windows);
        let mut out = Vec::new();
        match reader.read_to_end(&mut out) {
            Ok(_) => Ok(out),
            Err(err) => Err(reader.into_error(err)),
        }
    }

    #[test]
    fn test_windows_are_read_in_order() {
        let mut source = Cursor::new(b"0123456789".to_vec());
        let windows = [
            Window { offset: 0, len: 2 },
            Window { offset: 5, len: 2 },
            Window { offset: 8, len: 2 },
        ];
        assert_eq!(drain(&mut source, &windows).unwrap(), b"015689");
    }

    #[test]
    fn test_overlapping_windows_repeat_bytes() {
        let mut source = Cursor::new(b"abcdef".to_vec());
        let windows = [
            Window { offset: 0, len: 4 },
            Window { offset: 2, len: 4 },
        ];
        assert_eq!(drain(&mut source, &windows).unwrap(), b"abcdcdef");
    }

    #[test]
    fn test_bytes_past_window_are_not_streamed() {
        let mut source = Cursor::new(b"abcdef".to_vec());
        let windows = [Window { offset: 0, len: 3 }];
        assert_eq!(drain(&mut source, &windows).unwrap(), b"abc");
    }

    #[test]
    fn test_empty_window_list() {
        let mut source = Cursor::new(Vec::new());
        assert!(drain(&mut source, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_window_is_short_read() {
        let mut source = Cursor::new(b"abcdef".to_vec());
        let windows = [
            Window { offset: 0, len: 2 },
            Window { offset: 4, len: 4 },
        ];
        match drain(&mut source, &windows).unwrap_err() {
            DigestError::ShortRead {
                offset,
                expected,
                actual,
                ..
            } => {
                assert_eq!(offset, 4);
                assert_eq!(expected, 4);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_failure_reports_offset() {
        struct FailsAfter {
            inner: Cursor<Vec<u8>>,
            limit: u64,
        }

        impl Read for FailsAfter {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.inner.position() >= self.limit {
                    return Err(io::Error::other("bad sector"));
                }
                let room = (self.limit - self.inner.position()) as usize;
                let n = buf.len().min(room);
                self.inner.read(&mut buf[..n])
            }
        }

        impl Seek for FailsAfter {
            fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
                self.inner.seek(pos)
            }
        }

        let mut source = FailsAfter {
            inner: Cursor::new(vec![0u8; 100]),
            limit: 10,
        };
        let windows = [Window { offset: 0, len: 100 }];
        match drain(&mut source, &windows).unwrap_err() {
            DigestError::Read { offset, source, .. } => {
                assert_eq!(offset, 10);
                assert_eq!(source.to_string(), "bad sector");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
