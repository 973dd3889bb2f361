//! The allocator plug-in interface.
//!
//! Containers never call `std::alloc` directly. They hold an [`Allocator`]
//! chosen at construction time: the zero-sized [`SystemAllocator`](crate::SystemAllocator)
//! by default, or a shared reference to a bump region.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::ptr::NonNull;

use crate::error::AllocError;

/// Outcome of handing a block back to its allocator.
///
/// The meaning of "free" is allocator-defined: a general-purpose heap frees
/// immediately, while a bump region can only reclaim the most recent block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// The block was returned to the general allocator.
    Freed,
    /// The block was the topmost allocation and the cursor moved back over it.
    RolledBack,
    /// The request was not LIFO; the bytes stay reserved until the allocator
    /// is reset or dropped.
    Retained,
}

/// Source of raw storage for regionkit containers.
///
/// # Safety
///
/// Implementors must guarantee that every pointer returned from
/// [`alloc`](Allocator::alloc) or
/// [`alloc_zeroed`](Allocator::alloc_zeroed) is aligned to
/// `layout.align()`, valid for reads and writes of `layout.size()` bytes, and
/// not handed out again until it is released, the allocator is reset, or the
/// allocator is dropped. Callers never pass zero-size layouts.
pub unsafe trait Allocator {
    /// Reserve a block for `layout`.
    fn alloc(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Reserve a block for `layout` whose bytes are all zero.
    fn alloc_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let ptr = self.alloc(layout)?;
        // SAFETY: `alloc` returned a block valid for `layout.size()` writes.
        unsafe {
            ptr.as_ptr().write_bytes(0, layout.size());
        }
        Ok(ptr)
    }

    /// Hand a block back.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for exactly `layout`,
    /// and must not be used after this call.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) -> Release;

    /// Try to change the size of a live block without moving it.
    ///
    /// Returns `true` if the block now spans `new.size()` bytes. The default
    /// never resizes.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for exactly `old`, and
    /// `new.align()` must equal `old.align()`.
    unsafe fn resize_in_place(&self, ptr: NonNull<u8>, old: Layout, new: Layout) -> bool {
        let _ = (ptr, old, new);
        false
    }

    /// Reclaim every block at once.
    ///
    /// Takes `&mut self`, so it cannot run while any container still borrows
    /// the allocator.
    fn reset(&mut self) -> Result<(), AllocError> {
        Err(AllocError::ResetUnsupported)
    }
}

// SAFETY: forwards to `A`, which upholds the contract itself.
unsafe impl<A: Allocator + ?Sized> Allocator for &A {
    fn alloc(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).alloc(layout)
    }

    fn alloc_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).alloc_zeroed(layout)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) -> Release {
        // SAFETY: caller contract is forwarded unchanged.
        unsafe { (**self).release(ptr, layout) }
    }

    unsafe fn resize_in_place(&self, ptr: NonNull<u8>, old: Layout, new: Layout) -> bool {
        // SAFETY: caller contract is forwarded unchanged.
        unsafe { (**self).resize_in_place(ptr, old, new) }
    }
}
