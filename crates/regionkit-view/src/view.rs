//! Typed iteration views.

use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};

use regionkit_core::Allocator;
use regionkit_seq::Sequence;

use crate::state::{Cursor, ViewState};

/// Containers that can describe their storage as a [`View`].
///
/// Implemented for [`Sequence`], `Vec<T>`, slices and arrays, so one loop
/// shape works over all of them.
pub trait AsView {
    /// Element type seen by the traversal.
    type Item: Copy;

    /// Borrow the container's elements as a fresh, unattached view.
    fn as_view(&mut self) -> View<'_, Self::Item>;
}

impl<T: Copy, A: Allocator> AsView for Sequence<T, A> {
    type Item = T;

    fn as_view(&mut self) -> View<'_, T> {
        View::new(self.as_mut_slice())
    }
}

impl<T: Copy> AsView for Vec<T> {
    type Item = T;

    fn as_view(&mut self) -> View<'_, T> {
        View::new(self.as_mut_slice())
    }
}

impl<T: Copy> AsView for [T] {
    type Item = T;

    fn as_view(&mut self) -> View<'_, T> {
        View::new(self)
    }
}

impl<T: Copy, const N: usize> AsView for [T; N] {
    type Item = T;

    fn as_view(&mut self) -> View<'_, T> {
        View::new(self.as_mut_slice())
    }
}

/// A non-owning `{pointer, count, element size}` descriptor over a
/// container's elements, valid for one traversal.
///
/// The borrow on the container lasts as long as the view, so the container
/// cannot grow, shrink or be dropped mid-loop. Each step copies the element
/// into a local, lets the caller read or modify it, and writes it back before
/// advancing.
pub struct View<'a, T: Copy> {
    items: Option<&'a mut [T]>,
    cursor: Cursor,
}

impl<'a, T: Copy> View<'a, T> {
    /// Describe `items` as an unattached view.
    pub fn new(items: &'a mut [T]) -> Self {
        Self {
            items: Some(items),
            cursor: Cursor::default(),
        }
    }

    /// Number of elements described (zero once unlinked).
    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, |items| items.len())
    }

    /// Whether the view describes no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of one element in bytes.
    pub fn element_size(&self) -> usize {
        mem::size_of::<T>()
    }

    /// Address of the first element, or `None` once unlinked.
    pub fn as_ptr(&self) -> Option<*const T> {
        self.items.as_ref().map(|items| items.as_ptr())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ViewState {
        self.cursor.state()
    }

    /// Index of the next element a traversal step will visit.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Elements not yet visited.
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position())
    }

    /// Mark the view as in use by a loop.
    pub(crate) fn attach(&mut self) {
        self.cursor.attach();
    }

    /// Drop the reference to the container. The view yields nothing from
    /// now on.
    pub fn unlink(&mut self) {
        self.items = None;
        self.cursor.unlink();
    }

    /// Step to the next element, returning a [`Slot`] holding a local copy.
    ///
    /// Returns `None` (and unlinks the view) once every element was visited.
    pub fn next_slot(&mut self) -> Option<Slot<'_, T>> {
        let len = self.len();
        let Some(index) = self.cursor.step(len) else {
            self.unlink();
            return None;
        };
        let target = &mut self.items.as_deref_mut()?[index];
        Some(Slot {
            local: *target,
            target,
            index,
        })
    }

    /// Visit every remaining element, writing back whatever `f` leaves in
    /// the local copy. The view is unlinked afterwards.
    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        while let Some(mut slot) = self.next_slot() {
            f(&mut *slot);
        }
    }

    /// Visit the elements in `[start, end)` only, then unlink.
    ///
    /// # Panics
    ///
    /// Panics unless `start <= end <= len`. An unlinked view visits nothing.
    pub fn for_each_in<F>(&mut self, start: usize, end: usize, mut f: F)
    where
        F: FnMut(&mut T),
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

impl<T: Copy> fmt::Debug for View<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("len", &self.len())
            .field("element_size", &self.element_size())
            .field("position", &self.position())
            .field("state", &self.state())
            .finish()
    }
}

/// The local copy of one element during a traversal step.
///
/// Dereferences to the copy; dropping the slot writes the copy back into
/// the container.
pub struct Slot<'v, T: Copy> {
    target: &'v mut T,
    local: T,
    index: usize,
}

impl<T: Copy> Slot<'_, T> {
    /// Index of this element in the container.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T: Copy> Deref for Slot<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.local
    }
}

impl<T: Copy> DerefMut for Slot<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.local
    }
}

impl<T: Copy> Drop for Slot<'_, T> {
    fn drop(&mut self) {
        *self.target = self.local;
    }
}
