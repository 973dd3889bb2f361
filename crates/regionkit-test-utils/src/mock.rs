//! Instrumented allocators.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;

use regionkit_core::{AllocError, Allocator, Release, SystemAllocator};

/// Wraps [`SystemAllocator`] and counts every call.
///
/// Share it by reference (`Sequence::new_in(&counter)`) and inspect the
/// counters after the code under test has run.
#[derive(Debug, Default)]
pub struct CountingAllocator {
    allocations: Cell<usize>,
    releases: Cell<usize>,
    live_bytes: Cell<usize>,
    peak_bytes: Cell<usize>,
}

impl CountingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `alloc`/`alloc_zeroed` calls.
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    /// Number of `release` calls.
    pub fn releases(&self) -> usize {
        self.releases.get()
    }

    /// Bytes currently handed out and not yet released.
    pub fn live_bytes(&self) -> usize {
        self.live_bytes.get()
    }

    /// Largest value `live_bytes` has reached.
    pub fn peak_bytes(&self) -> usize {
        self.peak_bytes.get()
    }

    /// Allocations minus releases.
    pub fn outstanding(&self) -> usize {
        self.allocations() - self.releases()
    }

    fn record_alloc(&self, layout: Layout) {
        self.allocations.set(self.allocations.get() + 1);
        let live = self.live_bytes.get() + layout.size();
        self.live_bytes.set(live);
        self.peak_bytes.set(self.peak_bytes.get().max(live));
    }
}

// SAFETY: every block comes from `SystemAllocator` and goes back to it.
unsafe impl Allocator for CountingAllocator {
    fn alloc(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let ptr = SystemAllocator.alloc(layout)?;
        self.record_alloc(layout);
        Ok(ptr)
    }

    fn alloc_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let ptr = SystemAllocator.alloc_zeroed(layout)?;
        self.record_alloc(layout);
        Ok(ptr)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) -> Release {
        self.releases.set(self.releases.get() + 1);
        self.live_bytes.set(self.live_bytes.get() - layout.size());
        // SAFETY: caller contract is forwarded unchanged.
        unsafe { SystemAllocator.release(ptr, layout) }
    }
}

/// Wraps [`SystemAllocator`] and fails every request after the first
/// `budget` successful ones.
#[derive(Debug)]
pub struct FailingAllocator {
    remaining: Cell<usize>,
}

impl FailingAllocator {
    pub fn new(budget: usize) -> Self {
        Self {
            remaining: Cell::new(budget),
        }
    }

    /// Requests still allowed to succeed.
    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }
}

// SAFETY: every block comes from `SystemAllocator` and goes back to it.
unsafe impl Allocator for FailingAllocator {
    fn alloc(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        match self.remaining.get() {
            0 => Err(AllocError::Exhausted {
                requested: layout.size(),
                remaining: 0,
            }),
            n => {
                self.remaining.set(n - 1);
                SystemAllocator.alloc(layout)
            }
        }
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) -> Release {
        // SAFETY: caller contract is forwarded unchanged.
        unsafe { SystemAllocator.release(ptr, layout) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_allocations_and_releases() {
        let counter = CountingAllocator::new();
        let layout = Layout::from_size_align(32, 8).unwrap();
        let p = counter.alloc(layout).unwrap();
        assert_eq!(counter.allocations(), 1);
        assert_eq!(counter.live_bytes(), 32);
        // SAFETY: allocated above with the same layout.
        assert_eq!(unsafe { counter.release(p, layout) }, Release::Freed);
        assert_eq!(counter.outstanding(), 0);
        assert_eq!(counter.live_bytes(), 0);
        assert_eq!(counter.peak_bytes(), 32);
    }

    #[test]
    fn failing_allocator_spends_its_budget() {
        let alloc = FailingAllocator::new(1);
        let layout = Layout::from_size_align(8, 8).unwrap();
        let p = alloc.alloc(layout).unwrap();
        assert!(alloc.alloc(layout).is_err());
        // SAFETY: allocated above with the same layout.
        unsafe { alloc.release(p, layout) };
    }
}
