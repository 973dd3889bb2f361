//! Span handles and checkpoint markers.
//!
//! A [`Span`] encodes a byte range inside a region together with the
//! generation it was issued in. The generation allows O(log n) staleness
//! checks after rollbacks and resets without any per-allocation bookkeeping.

use std::fmt;

/// A byte range handed out by [`Region::allocate`](crate::Region::allocate).
///
/// Spans replace raw pointers on the handle path. Resolve one with
/// [`Region::bytes`](crate::Region::bytes) or
/// [`Region::bytes_mut`](crate::Region::bytes_mut).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Span {
    /// Region generation when this span was issued.
    pub(crate) generation: u64,
    /// Byte offset from the start of the region's buffer.
    pub(crate) offset: usize,
    /// Length in bytes.
    pub(crate) len: usize,
}

impl Span {
    pub(crate) fn new(generation: u64, offset: usize, len: usize) -> Self {
        Self {
            generation,
            offset,
            len,
        }
    }

    /// The generation this span belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Byte offset from the start of the region.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length span.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte of the span.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Span(gen={}, off={}, len={})",
            self.generation, self.offset, self.len
        )
    }
}

/// A restore point captured by [`Region::checkpoint`](crate::Region::checkpoint).
///
/// Restoring it with [`Region::rollback`](crate::Region::rollback) reclaims
/// everything allocated since, which is only correct if none of those
/// allocations is still in use. The region rejects markers that are above the
/// cursor or that were themselves invalidated by an earlier, deeper rollback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Checkpoint {
    pub(crate) cursor: usize,
    pub(crate) generation: u64,
}

impl Checkpoint {
    /// Cursor position captured by this checkpoint.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Region generation when the checkpoint was taken.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
