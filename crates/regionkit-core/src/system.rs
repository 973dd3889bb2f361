//! The general-purpose allocator backed by `std::alloc`.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use tracing::trace;

use crate::error::AllocError;
use crate::traits::{Allocator, Release};

/// Zero-sized handle to the global allocator.
///
/// This is the default allocator of every regionkit container. Blocks are
/// freed immediately on release, and `reset` is a no-op because there is
/// nothing to reclaim in bulk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemAllocator;

// SAFETY: every block comes straight from `std::alloc::alloc` with the caller's
// layout and is only returned to `std::alloc::dealloc` on release.
unsafe impl Allocator for SystemAllocator {
    fn alloc(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() > 0, "zero-size layouts never reach an allocator");
        // SAFETY: layout has a non-zero size (caller contract).
        let ptr = unsafe { alloc::alloc(layout) };
        trace!(size = layout.size(), align = layout.align(), ptr = ?ptr, "system allocate");
        NonNull::new(ptr).ok_or(AllocError::Exhausted {
            requested: layout.size(),
            remaining: 0,
        })
    }

    fn alloc_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() > 0, "zero-size layouts never reach an allocator");
        // SAFETY: layout has a non-zero size (caller contract).
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        NonNull::new(ptr).ok_or(AllocError::Exhausted {
            requested: layout.size(),
            remaining: 0,
        })
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) -> Release {
        trace!(size = layout.size(), ptr = ?ptr, "system release");
        // SAFETY: ptr was allocated by `std::alloc` with this exact layout.
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) };
        Release::Freed
    }

    fn reset(&mut self) -> Result<(), AllocError> {
        Ok(())
    }
}
