//! Byte-erased iteration views.

use std::fmt;
use std::ops::{Deref, DerefMut};

use regionkit_core::Allocator;
use regionkit_seq::RawSequence;
use smallvec::SmallVec;

use crate::state::{Cursor, ViewState};

/// Containers of runtime-width elements that can describe their storage as
/// a [`RawView`].
pub trait AsRawView {
    /// Borrow the container's bytes as a fresh, unattached view.
    fn as_raw_view(&mut self) -> RawView<'_>;
}

impl<A: Allocator> AsRawView for RawSequence<A> {
    fn as_raw_view(&mut self) -> RawView<'_> {
        let width = self.element_size();
        RawView::new(self.as_bytes_mut(), width)
    }
}

/// [`View`](crate::View) over elements that are `element_size` bytes wide.
pub struct RawView<'a> {
    bytes: Option<&'a mut [u8]>,
    element_size: usize,
    cursor: Cursor,
}

impl<'a> RawView<'a> {
    /// Describe `bytes` as consecutive `element_size`-byte elements.
    ///
    /// # Panics
    ///
    /// Panics if `element_size` is zero or does not divide `bytes.len()`.
    pub fn new(bytes: &'a mut [u8], element_size: usize) -> Self {
        assert!(element_size > 0, "element size must be non-zero");
        assert!(
            bytes.len() % element_size == 0,
            "{} bytes is not a whole number of {element_size}-byte elements",
            bytes.len()
        );
        Self {
            bytes: Some(bytes),
            element_size,
            cursor: Cursor::default(),
        }
    }

    /// Number of elements described (zero once unlinked).
    pub fn len(&self) -> usize {
        self.bytes
            .as_ref()
            .map_or(0, |bytes| bytes.len() / self.element_size)
    }

    /// Whether the view describes no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of one element in bytes.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Address of the first byte, or `None` once unlinked.
    pub fn as_ptr(&self) -> Option<*const u8> {
        self.bytes.as_ref().map(|bytes| bytes.as_ptr())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ViewState {
        self.cursor.state()
    }

    /// Index of the next element a traversal step will visit.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Drop the reference to the container.
    pub fn unlink(&mut self) {
        self.bytes = None;
        self.cursor.unlink();
    }

    /// Step to the next element, returning a [`RawSlot`] holding a local copy
    /// of its bytes.
    pub fn next_slot(&mut self) -> Option<RawSlot<'_>> {
        let len = self.len();
        let Some(index) = self.cursor.step(len) else {
            self.unlink();
            return None;
        };
        let width = self.element_size;
        let target = &mut self.bytes.as_deref_mut()?[index * width..(index + 1) * width];
        Some(RawSlot {
            local: SmallVec::from_slice(target),
            target,
            index,
        })
    }

    /// Visit every remaining element, writing back the local bytes after
    /// each step. The view is unlinked afterwards.
    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut [u8]),
    {
        while let Some(mut slot) = self.next_slot() {
            f(&mut *slot);
        }
    }

    /// Visit the elements in `[start, end)` only, then unlink.
    ///
    /// # Panics
    ///
    /// Panics unless `start <= end <= len`.
    pub fn for_each_in<F>(&mut self, start: usize, end: usize, mut f: F)
    where
        F: FnMut(&mut [u8]),
    {
        if self.state() == ViewState::Unlinked {
            return;
        }
        let len = self.len();
        assert!(
            start <= end && end <= len,
            "range [{start}, {end}) out of bounds for view of {len} elements"
        );
        self.cursor.seek(start);
        while self.position() < end {
            match self.next_slot() {
                Some(mut slot) => f(&mut *slot),
                None => break,
            }
        }
        self.unlink();
    }
}

impl fmt::Debug for RawView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawView")
            .field("len", &self.len())
            .field("element_size", &self.element_size)
            .field("position", &self.position())
            .field("state", &self.state())
            .finish()
    }
}

/// Local copy of one element's bytes; written back on drop.
pub struct RawSlot<'v> {
    target: &'v mut [u8],
    local: SmallVec<[u8; 32]>,
    index: usize,
}

impl RawSlot<'_> {
    /// Index of this element in the container.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Deref for RawSlot<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.local
    }
}

impl DerefMut for RawSlot<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.local
    }
}

impl Drop for RawSlot<'_> {
    fn drop(&mut self) {
        self.target.copy_from_slice(&self.local);
    }
}
