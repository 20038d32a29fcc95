//! Source location spans.
//!
//! Compact 8-byte span over the text handed to a parse pass.

use std::fmt;
use std::ops::Range;

/// Byte range in the parsed text.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from the start of the text
/// - end: u32 - byte offset (exclusive)
///
/// Offsets past `u32::MAX` saturate; editor input never gets near that.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create from a `usize` byte range, saturating at `u32::MAX`.
    #[inline]
    pub fn from_range(range: Range<usize>) -> Self {
        Span {
            start: saturate(range.start),
            end: saturate(range.end),
        }
    }

    /// Start offset as `usize`, for slicing.
    #[inline]
    pub const fn start(&self) -> usize {
        self.start as usize
    }

    /// End offset as `usize`, for slicing.
    #[inline]
    pub const fn end(&self) -> usize {
        self.end as usize
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Convert back into a `usize` range.
    #[inline]
    pub fn to_range(self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Slice `text` by this span, or `None` if out of bounds or not on char boundaries.
    #[inline]
    pub fn slice(self, text: &str) -> Option<&str> {
        text.get(self.to_range())
    }
}

#[inline]
fn saturate(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests;
