//! Owned element storage drawn from a pluggable allocator.
//!
//! All `unsafe` code of this crate lives here. [`RawStorage`] upholds one
//! invariant: `ptr` is valid for `cap` elements and the first `len` of them
//! are initialized. Everything built on top works with safe slices.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

use regionkit_core::Allocator;
use tracing::trace;

use crate::error::SequenceError;

/// A block of `cap` elements from `alloc`, of which `len` are initialized.
pub(crate) struct RawStorage<T: Copy, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: RawStorage owns its block exclusively; sending it sends the
// elements and the allocator handle.
unsafe impl<T: Copy + Send, A: Allocator + Send> Send for RawStorage<T, A> {}
// SAFETY: shared access only hands out `&[T]` and `&A`.
unsafe impl<T: Copy + Sync, A: Allocator + Sync> Sync for RawStorage<T, A> {}

impl<T: Copy, A: Allocator> RawStorage<T, A> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Empty storage. Zero-sized element types get unbounded capacity and
    /// never touch the allocator.
    pub(crate) fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: if Self::IS_ZST { usize::MAX } else { 0 },
            len: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    pub(crate) fn layout(cap: usize) -> Result<Layout, SequenceError> {
        Layout::array::<T>(cap).map_err(|_| SequenceError::CapacityOverflow)
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    pub(crate) fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` elements are initialized; a dangling pointer
        // is valid for zero-length and zero-sized reads.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Copy `values` into spare capacity right after the initialized prefix.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not fit in the spare capacity.
    pub(crate) fn extend_within(&mut self, values: &[T]) {
        assert!(
            values.len() <= self.cap - self.len,
            "extend of {} elements exceeds spare capacity {}",
            values.len(),
            self.cap - self.len
        );
        // SAFETY: the destination `[len, len + n)` lies inside the block, and
        // `values` cannot alias it while we hold `&mut self`.
        unsafe {
            ptr::copy_nonoverlapping(
                values.as_ptr(),
                self.ptr.as_ptr().add(self.len),
                values.len(),
            );
        }
        self.len += values.len();
    }

    /// Shorten the initialized prefix. No-op if `len >= self.len()`.
    pub(crate) fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    /// Move to a block of exactly `new_cap` elements, keeping the
    /// initialized prefix. `new_cap` must be at least `len`.
    ///
    /// The allocator is asked to resize the current block in place first. A
    /// zero `new_cap` releases the block entirely. On error the storage is
    /// left untouched.
    pub(crate) fn reallocate(&mut self, new_cap: usize) -> Result<(), SequenceError> {
        debug_assert!(new_cap >= self.len, "reallocate below initialized length");
        if Self::IS_ZST || new_cap == self.cap {
            return Ok(());
        }
        let new_layout = Self::layout(new_cap)?;
        if new_cap == 0 {
            self.release();
            return Ok(());
        }
        if self.cap == 0 {
            self.ptr = self.alloc.alloc(new_layout)?.cast();
            self.cap = new_cap;
            return Ok(());
        }

        let old_layout = Self::layout(self.cap)?;
        // SAFETY: the block came from `self.alloc` with `old_layout`, and both
        // layouts share `align_of::<T>()`.
        if unsafe {
            self.alloc
                .resize_in_place(self.ptr.cast(), old_layout, new_layout)
        } {
            trace!(old = self.cap, new = new_cap, "storage resized in place");
            self.cap = new_cap;
            return Ok(());
        }

        let new_ptr: NonNull<T> = self.alloc.alloc(new_layout)?.cast();
        // SAFETY: the new block is distinct from the live old one and both hold
        // at least `len` elements.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
        }
        self.release();
        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    /// Hand the block back to the allocator and become empty-capacity.
    fn release(&mut self) {
        if !Self::IS_ZST && self.cap != 0 {
            if let Ok(layout) = Self::layout(self.cap) {
                // SAFETY: the block came from `self.alloc` with this layout and
                // is not referenced after this point.
                let outcome = unsafe { self.alloc.release(self.ptr.cast(), layout) };
                trace!(bytes = layout.size(), ?outcome, "storage released");
            }
        }
        self.ptr = NonNull::dangling();
        self.cap = if Self::IS_ZST { usize::MAX } else { 0 };
        self.len = self.len.min(self.cap);
    }
}

impl<T: Copy, A: Allocator> Drop for RawStorage<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}
