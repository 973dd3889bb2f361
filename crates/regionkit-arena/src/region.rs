//! The bump-pointer region allocator.
//!
//! A [`Region`] owns one contiguous buffer and a cursor. It hands out memory
//! in two ways:
//!
//! - **Handle path** (`&mut self`): [`Region::allocate`] returns a [`Span`]
//!   that is resolved to bytes on demand. This path implements the full
//!   region contract, including reset-and-retry for resettable regions.
//! - **Shared path** (`&Region` as an [`Allocator`]): containers such as
//!   sequences borrow the region and receive raw blocks. Because those
//!   borrowers may still be alive, this path never resets on exhaustion.
//!
//! No metadata is kept per allocation. Space is reclaimed only by rolling the
//! cursor back to a [`Checkpoint`] (stack discipline) or by a full reset.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;

use regionkit_core::{AllocError, Allocator, Release};
use tracing::{debug, error, trace, warn};

use crate::config::RegionConfig;
use crate::error::RegionError;
use crate::generation::GenerationLog;
use crate::handle::{Checkpoint, Span};
use crate::raw::{align_up, RawBuffer};

/// Bump-allocated memory region with checkpoint/rollback.
///
/// # Hazards
///
/// - [`rollback`](Region::rollback) reclaims everything allocated after the
///   checkpoint. Spans from that range become stale and are rejected by
///   [`bytes`](Region::bytes); pointers obtained from them must not be used.
/// - On a resettable region, running out of space on the handle path resets
///   the cursor to zero and retries once. **Every span issued before the
///   reset becomes stale.** The reset is logged at `warn` level.
/// - On a non-resettable region, running out of space in
///   [`allocate`](Region::allocate) is fatal: the failure is logged at `error`
///   level and the call panics.
pub struct Region {
    buffer: RawBuffer,
    /// Bump pointer: next free byte offset.
    cursor: Cell<usize>,
    /// Highest byte ever handed out on the shared path since the last scrub.
    /// Bytes in `[cursor, shared_high)` may hold uninitialized padding left
    /// by typed containers and are zeroed before the handle path reuses them.
    shared_high: Cell<usize>,
    generations: GenerationLog,
    resettable: bool,
}

impl Region {
    /// Create a region of `capacity` bytes.
    ///
    /// `resettable` selects what happens on exhaustion (see
    /// [`RegionConfig::resettable`]).
    pub fn new(capacity: usize, resettable: bool) -> Result<Self, RegionError> {
        Self::with_config(RegionConfig::new(capacity).resettable(resettable))
    }

    /// Create a region from a validated configuration.
    pub fn with_config(config: RegionConfig) -> Result<Self, RegionError> {
        let layout = config.layout()?;
        let buffer = RawBuffer::zeroed(layout).ok_or(RegionError::Exhausted {
            requested: config.capacity,
            capacity: config.capacity,
            cursor: 0,
        })?;
        debug!(
            capacity = config.capacity,
            resettable = config.resettable,
            align = config.align,
            "region created"
        );
        Ok(Self {
            buffer,
            cursor: Cell::new(0),
            shared_high: Cell::new(0),
            generations: GenerationLog::new(),
            resettable: config.resettable,
        })
    }

    /// Bump-allocate `size` bytes on the handle path.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be satisfied, even after the automatic
    /// reset of a resettable region.
    pub fn allocate(&mut self, size: usize) -> Span {
        match self.try_allocate(size) {
            Ok(span) => span,
            Err(err) => fatal(&err),
        }
    }

    /// Bump-allocate `size` bytes, reporting exhaustion as an error.
    ///
    /// A resettable region resets and retries once before giving up.
    ///
    /// A request larger than the whole buffer fails without resetting, so
    /// outstanding spans stay valid.
    pub fn try_allocate(&mut self, size: usize) -> Result<Span, RegionError> {
        let cursor = self.cursor.get();
        if size > self.capacity() - cursor {
            if !self.resettable || size > self.capacity() {
                return Err(self.exhausted(size));
            }
            warn!(
                requested = size,
                cursor,
                capacity = self.capacity(),
                "region exhausted; resetting and invalidating all outstanding spans"
            );
            self.reset_cursor();
        }
        // Runs after any reset so the retried span is scrubbed too.
        self.scrub_shared();
        let offset = self.cursor.get();
        self.cursor.set(offset + size);
        trace!(offset, size, "region allocate");
        Ok(Span::new(self.generations.current(), offset, size))
    }

    /// Allocate `count * size` zero-filled bytes.
    ///
    /// # Panics
    ///
    /// Panics on exhaustion, like [`allocate`](Self::allocate), or if
    /// `count * size` overflows.
    pub fn allocate_zeroed(&mut self, count: usize, size: usize) -> Span {
        match self.try_allocate_zeroed(count, size) {
            Ok(span) => span,
            Err(err) => fatal(&err),
        }
    }

    /// Allocate `count * size` zero-filled bytes, reporting exhaustion as an error.
    pub fn try_allocate_zeroed(&mut self, count: usize, size: usize) -> Result<Span, RegionError> {
        let total = count
            .checked_mul(size)
            .ok_or_else(|| self.exhausted(usize::MAX))?;
        let span = self.try_allocate(total)?;
        self.buffer.slice_mut(span.offset, span.len).fill(0);
        Ok(span)
    }

    /// Capture the current cursor as a restore point.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            cursor: self.cursor.get(),
            generation: self.generations.current(),
        }
    }

    /// Move the cursor back to `marker`, reclaiming everything after it.
    ///
    /// Only correct under LIFO discipline: nothing allocated after `marker`
    /// may still be in use. Spans from the discarded range become stale.
    ///
    /// Returns `InvalidCheckpoint` if the marker lies above the cursor, and
    /// `StaleSpan` if the bytes it points into were already discarded by a
    /// deeper rollback or a reset.
    pub fn rollback(&mut self, marker: Checkpoint) -> Result<(), RegionError> {
        let cursor = self.cursor.get();
        if marker.cursor > cursor {
            return Err(RegionError::InvalidCheckpoint {
                marker: marker.cursor,
                cursor,
            });
        }
        self.generations
            .is_intact(marker.generation, marker.cursor)
            .map_err(|surviving| RegionError::StaleSpan {
                span_generation: marker.generation,
                surviving,
            })?;
        if marker.cursor == cursor {
            return Ok(());
        }
        self.scrub_shared();
        self.cursor.set(marker.cursor);
        let generation = self.generations.advance(marker.cursor);
        debug!(from = cursor, to = marker.cursor, generation, "region rollback");
        Ok(())
    }

    /// Move the cursor back to zero, invalidating every span.
    ///
    /// Returns `NotResettable` if the region was created non-resettable.
    pub fn reset(&mut self) -> Result<(), RegionError> {
        if !self.resettable {
            return Err(RegionError::NotResettable);
        }
        self.reset_cursor();
        Ok(())
    }

    /// Resolve a span to its bytes.
    pub fn bytes(&self, span: Span) -> Result<&[u8], RegionError> {
        self.check_span(span)?;
        Ok(self.buffer.slice(span.offset, span.len))
    }

    /// Resolve a span to its bytes for writing.
    pub fn bytes_mut(&mut self, span: Span) -> Result<&mut [u8], RegionError> {
        self.check_span(span)?;
        Ok(self.buffer.slice_mut(span.offset, span.len))
    }

    /// Raw address of a span's first byte.
    pub fn ptr(&self, span: Span) -> Result<NonNull<u8>, RegionError> {
        self.check_span(span)?;
        Ok(self.buffer.at(span.offset))
    }

    /// Total size of the buffer in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes between the start of the buffer and the cursor.
    pub fn used(&self) -> usize {
        self.cursor.get()
    }

    /// Bytes between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.capacity() - self.cursor.get()
    }

    /// Current generation (advanced by every rollback and reset).
    pub fn generation(&self) -> u64 {
        self.generations.current()
    }

    /// Whether the region may be reset.
    pub fn is_resettable(&self) -> bool {
        self.resettable
    }

    fn check_span(&self, span: Span) -> Result<(), RegionError> {
        if span.end() > self.cursor.get() && span.generation == self.generations.current() {
            // Only reachable if the span was forged or belongs to another region.
            return Err(RegionError::StaleSpan {
                span_generation: span.generation,
                surviving: self.cursor.get(),
            });
        }
        self.generations
            .is_intact(span.generation, span.end())
            .map_err(|surviving| RegionError::StaleSpan {
                span_generation: span.generation,
                surviving,
            })
    }

    fn reset_cursor(&mut self) {
        self.scrub_shared();
        let from = self.cursor.get();
        self.cursor.set(0);
        let generation = self.generations.advance(0);
        debug!(from, generation, "region reset");
    }

    /// Zero bytes above the cursor that the shared path may have left with
    /// uninitialized padding, before the handle path can expose them.
    fn scrub_shared(&mut self) {
        let cursor = self.cursor.get();
        let high = self.shared_high.get();
        if high > cursor {
            self.buffer.slice_mut(cursor, high - cursor).fill(0);
        }
        self.shared_high.set(cursor);
    }

    fn exhausted(&self, requested: usize) -> RegionError {
        RegionError::Exhausted {
            requested,
            capacity: self.capacity(),
            cursor: self.cursor.get(),
        }
    }

    fn offset_of(&self, ptr: NonNull<u8>) -> usize {
        ptr.as_ptr() as usize - self.buffer.base().as_ptr() as usize
    }

    fn mark_shared(&self, end: usize) {
        if end > self.shared_high.get() {
            self.shared_high.set(end);
        }
    }
}

impl std::fmt::Debug for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Region")
            .field("capacity", &self.capacity())
            .field("used", &self.used())
            .field("generation", &self.generation())
            .field("resettable", &self.resettable)
            .finish()
    }
}

// SAFETY: blocks are carved from `buffer` between the cursor and the end of
// the buffer, aligned as requested, and the cursor only moves back over a
// block when that block is released (LIFO) or through `&mut self`, which
// proves no borrower is alive.
unsafe impl Allocator for Region {
    fn alloc(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let base = self.buffer.base().as_ptr() as usize;
        let cursor = self.cursor.get();
        let exhausted = || AllocError::Exhausted {
            requested: layout.size(),
            remaining: self.capacity() - cursor,
        };
        let start = align_up(base + cursor, layout.align()).ok_or_else(exhausted)? - base;
        let end = start.checked_add(layout.size()).ok_or_else(exhausted)?;
        if end > self.capacity() {
            return Err(exhausted());
        }
        self.cursor.set(end);
        self.mark_shared(end);
        trace!(offset = start, size = layout.size(), "region block allocate");
        Ok(self.buffer.at(start))
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) -> Release {
        let offset = self.offset_of(ptr);
        if offset + layout.size() == self.cursor.get() {
            self.cursor.set(offset);
            trace!(offset, size = layout.size(), "region block rolled back");
            Release::RolledBack
        } else {
            Release::Retained
        }
    }

    unsafe fn resize_in_place(&self, ptr: NonNull<u8>, old: Layout, new: Layout) -> bool {
        let offset = self.offset_of(ptr);
        if offset + old.size() != self.cursor.get() {
            return false;
        }
        match offset.checked_add(new.size()) {
            Some(end) if end <= self.capacity() => {
                self.cursor.set(end);
                self.mark_shared(end);
                trace!(offset, old = old.size(), new = new.size(), "region block resized in place");
                true
            }
            _ => false,
        }
    }

    fn reset(&mut self) -> Result<(), AllocError> {
        Region::reset(self).map_err(AllocError::from)
    }
}

/// Log an unrecoverable exhaustion and abort the current operation.
#[cold]
fn fatal(err: &RegionError) -> ! {
    error!(error = %err, "region cannot satisfy allocation");
    panic!("{err}");
}
