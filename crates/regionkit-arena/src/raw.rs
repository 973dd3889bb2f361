//! Low-level primitives for region memory.
//!
//! Every `unsafe` operation the region needs lives here, each with a
//! `// SAFETY:` comment. The buffer is zero-filled at creation so that all of
//! its bytes are initialized before any slice of it is handed out.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ptr::NonNull;

/// One owned, aligned, contiguous byte block.
pub(crate) struct RawBuffer {
    ptr: NonNull<u8>,
    layout: Layout,
}

// SAFETY: RawBuffer uniquely owns its allocation; moving it between threads
// moves that ownership. It is not Sync-shared by the region (Cell cursor).
unsafe impl Send for RawBuffer {}

impl RawBuffer {
    /// Allocate `layout.size()` zeroed bytes. A zero-size layout allocates
    /// nothing and uses a dangling pointer aligned to `layout.align()`.
    ///
    /// Returns `None` if the global allocator fails.
    pub(crate) fn zeroed(layout: Layout) -> Option<Self> {
        if layout.size() == 0 {
            // SAFETY: align is a non-zero power of two, so this is non-null
            // and suitably aligned for a zero-length block.
            let ptr = unsafe { NonNull::new_unchecked(layout.align() as *mut u8) };
            return Some(Self { ptr, layout });
        }
        // SAFETY: layout has non-zero size.
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        NonNull::new(ptr).map(|ptr| Self { ptr, layout })
    }

    /// Base address of the block.
    pub(crate) fn base(&self) -> NonNull<u8> {
        self.ptr
    }

    /// Size of the block in bytes.
    pub(crate) fn len(&self) -> usize {
        self.layout.size()
    }

    /// Address `offset` bytes into the block.
    ///
    /// # Panics
    ///
    /// Panics if `offset > len()`.
    pub(crate) fn at(&self, offset: usize) -> NonNull<u8> {
        assert!(offset <= self.len(), "offset {offset} outside buffer of {} bytes", self.len());
        // SAFETY: offset is within (or one past) the allocation.
        unsafe { NonNull::new_unchecked(self.ptr.as_ptr().add(offset)) }
    }

    /// Shared view of `[offset, offset + len)`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the block.
    pub(crate) fn slice(&self, offset: usize, len: usize) -> &[u8] {
        self.check_range(offset, len);
        // SAFETY: range checked above; every byte was initialized at creation
        // or by a later scrub, and `&self` prevents concurrent `&mut` views.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr().add(offset), len) }
    }

    /// Mutable view of `[offset, offset + len)`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the block.
    pub(crate) fn slice_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        self.check_range(offset, len);
        // SAFETY: range checked above; `&mut self` guarantees exclusivity.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().add(offset), len) }
    }

    fn check_range(&self, offset: usize, len: usize) {
        let end = offset.checked_add(len);
        assert!(
            end.is_some_and(|end| end <= self.len()),
            "range {offset}+{len} outside buffer of {} bytes",
            self.len()
        );
    }
}

impl Drop for RawBuffer {
    fn drop(&mut self) {
        if self.layout.size() != 0 {
            // SAFETY: allocated in `zeroed` with this exact layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) };
        }
    }
}

/// Align `addr` upward to the next multiple of `align`.
///
/// `align` must be a power of two. Returns `None` on overflow.
#[inline]
pub fn align_up(addr: usize, align: usize) -> Option<usize> {
    debug_assert!(align.is_power_of_two(), "alignment must be a power of two");
    let mask = align - 1;
    addr.checked_add(mask).map(|v| v & !mask)
}
