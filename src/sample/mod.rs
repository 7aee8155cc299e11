//! Sample selection.
//!
//! Decides whether an input is hashed in full or represented by three
//! fixed-size windows, and where those windows sit.

/// A contiguous byte range read from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    /// Start offset in the input.
    pub offset: u64,

    /// Length in bytes.
    pub len: u64,
}

impl Window {
    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.len
    }

    /// Returns `true` if `pos` lies inside this window.
    pub fn contains(&self, pos: u64) -> bool {
        pos >= self.offset && pos < self.end()
    }
}

/// How an input is read for mixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Every byte, from offset 0 to the end, once.
    Full,

    /// Three windows in mixing order: start, middle, end.
    ///
    /// Windows may overlap on inputs just above the threshold; overlapping
    /// bytes are mixed once per window.
    Sampled([Window; 3]),
}

impl Strategy {
    /// Returns `true` for [`Strategy::Sampled`].
    pub fn is_sampled(&self) -> bool {
        matches!(self, Strategy::Sampled(_))
    }

    /// Returns the sample windows, if any.
    pub fn windows(&self) -> Option<&[Window; 3]> {
        match self {
            Strategy::Full => None,
            Strategy::Sampled(windows) => Some(windows),
        }
    }

    /// Returns the number of bytes fed to the mixer for an input of `len` bytes.
    pub fn mixed_len(&self, len: u64) -> u64 {
        match self {
            Strategy::Full => len,
            Strategy::Sampled(windows) => windows.iter().map(|w| w.len).sum(),
        }
    }
}

/// Selects the strategy for an input of `len` bytes.
///
/// Sampling needs `size >= 1`, `len >= threshold` and `len >= 2 * size - 1`.
/// The last bound keeps the middle and end windows inside the input.
pub(crate) fn select(size: u64, threshold: u64, len: u64) -> Strategy {
    if size < 1 || len < threshold {
        return Strategy::Full;
    }
    match size.checked_mul(2) {
        Some(double) if len >= double - 1 => {}
        _ => return Strategy::Full,
    }

    let middle = len / 2;
    Strategy::Sampled([
        Window {
            offset: 0,
            len: size,
        },
        Window {
            offset: middle,
            len: size,
        },
        Window {
            offset: len - size,
            len: size,
        },
    ])
}
