//! The typed growable sequence.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice;

use regionkit_core::{Allocator, SystemAllocator};
use tracing::{error, trace};

use crate::error::SequenceError;
use crate::growth::GrowthPolicy;
use crate::raw::RawStorage;

/// A growable list of `Copy` elements whose storage comes from an
/// [`Allocator`] chosen at construction.
///
/// Elements are copied in and out by value; nothing the caller passes in is
/// aliased after a call returns. The sequence owns its storage but only
/// borrows the allocator when `A` is a reference such as `&Region`.
///
/// # Panics
///
/// Index-taking operations panic on out-of-range indices, naming the index
/// and the length. Growth that the allocator cannot satisfy is fatal: it is
/// logged at `error` level and then panics. Use
/// [`try_reserve`](Self::try_reserve) to pre-size and branch instead.
pub struct Sequence<T: Copy, A: Allocator = SystemAllocator> {
    buf: RawStorage<T, A>,
    growth: GrowthPolicy,
}

impl<T: Copy> Sequence<T> {
    /// Create an empty sequence on the system allocator.
    pub fn new() -> Self {
        Self::new_in(SystemAllocator)
    }

    /// Create an empty sequence with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, SystemAllocator)
    }

    /// Create a sequence holding a copy of `items`, with
    /// `capacity == len == items.len()`.
    pub fn from_slice(items: &[T]) -> Self {
        Self::from_slice_in(items, SystemAllocator)
    }
}

impl<T: Copy, A: Allocator> Sequence<T, A> {
    /// Create an empty sequence that will draw storage from `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self {
            buf: RawStorage::new_in(alloc),
            growth: GrowthPolicy::default(),
        }
    }

    /// Create an empty sequence with room for `capacity` elements from `alloc`.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        let mut seq = Self::new_in(alloc);
        seq.grow_exact(capacity);
        seq
    }

    /// Create a sequence in `alloc` holding a copy of `items`, with
    /// `capacity == len == items.len()`.
    pub fn from_slice_in(items: &[T], alloc: A) -> Self {
        let mut seq = Self::with_capacity_in(items.len(), alloc);
        seq.buf.extend_within(items);
        seq
    }

    /// Select the growth policy (builder style).
    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    // ── Observers ───────────────────────────────────────────────

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.buf.len() == 0
    }

    /// Number of elements the current storage can hold without growing.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The growth policy in effect.
    pub fn growth(&self) -> GrowthPolicy {
        self.growth
    }

    /// The allocator this sequence draws from.
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.buf.as_slice()
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buf.as_mut_slice()
    }

    /// Raw pointer to the first element (dangling when capacity is zero).
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Iterate over the live elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate mutably over the live elements.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    // ── Element access ──────────────────────────────────────────

    /// The element at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable reference to the element at `index`, or `None` if out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Overwrite the element at `index` with `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) {
        self[index] = value;
    }

    /// The first element, if any.
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// The last element, if any.
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    // ── Mutation ────────────────────────────────────────────────

    /// Append one element.
    pub fn push(&mut self, value: T) {
        self.append(&[value]);
    }

    /// Append a copy of `values`, growing first if needed.
    pub fn append(&mut self, values: &[T]) {
        self.reserve(values.len());
        self.buf.extend_within(values);
    }

    /// Insert a copy of `values` so that it starts at `index`, shifting the
    /// elements at and after `index` back by `values.len()`.
    ///
    /// `index == len` appends.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, values: &[T]) {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        self.append(values);
        self.as_mut_slice()[index..].rotate_right(values.len());
    }

    /// Insert a single element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_one(&mut self, index: usize, value: T) {
        self.insert(index, &[value]);
    }

    /// Remove and return the element at `index`, shifting later elements
    /// forward by one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len();
        assert!(
            index < len,
            "removal index (is {index}) should be < len (is {len})"
        );
        let slice = self.as_mut_slice();
        let value = slice[index];
        slice.copy_within(index + 1.., index);
        self.buf.truncate(len - 1);
        value
    }

    /// Remove the elements at `indices`, given in any order.
    ///
    /// The result equals removing, one at a time, at `sorted[j] - j` where
    /// `sorted` is `indices` in ascending order: every earlier removal has
    /// shifted the later targets forward by one. The removed values are
    /// returned in the caller's order of `indices`.
    ///
    /// Indices name positions before the call, so each element can be named
    /// once. All indices are validated before anything is moved.
    ///
    /// # Panics
    ///
    /// Panics if any index is `>= len` or appears twice.
    pub fn remove_many(&mut self, indices: &[usize]) -> Vec<T> {
        let sorted = sorted_removal_targets(indices, self.len());
        let removed = indices.iter().map(|&i| self.as_slice()[i]).collect();
        let kept = compact(self.as_mut_slice(), &sorted, 1);
        self.buf.truncate(kept);
        removed
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Option<T> {
        let last = *self.last()?;
        self.buf.truncate(self.len() - 1);
        Some(last)
    }

    /// Drop all elements, keeping the storage.
    pub fn clear(&mut self) {
        self.buf.truncate(0);
    }

    /// Keep only the first `len` elements. No-op if already shorter.
    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Whether any element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().contains(value)
    }

    /// Sort in place in ascending order.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.as_mut_slice().sort();
    }

    /// Sort in place with a three-way comparator.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_mut_slice().sort_by(compare);
    }

    // ── Combination ─────────────────────────────────────────────

    /// Append every element of `other`.
    pub fn concat<B: Allocator>(&mut self, other: &Sequence<T, B>) {
        self.append(other.as_slice());
    }

    /// Copy `[start, end)` into a fresh, independently owned sequence on a
    /// clone of this sequence's allocator. The copy's capacity equals its
    /// length and it inherits the growth policy.
    ///
    /// # Panics
    ///
    /// Panics unless `start <= end <= len`.
    pub fn slice(&self, start: usize, end: usize) -> Sequence<T, A>
    where
        A: Clone,
    {
        Sequence::from_slice_in(&self.as_slice()[start..end], self.allocator().clone())
            .with_growth(self.growth)
    }

    /// Copy every element into the front of `dest`.
    ///
    /// # Panics
    ///
    /// Panics if `dest` is shorter than `len`.
    pub fn copy_out(&self, dest: &mut [T]) {
        let len = self.len();
        assert!(
            dest.len() >= len,
            "destination holds {} elements but the sequence has {len}",
            dest.len()
        );
        dest[..len].copy_from_slice(self.as_slice());
    }

    /// Copy the elements into a `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    // ── Capacity ────────────────────────────────────────────────

    /// Make room for at least `additional` more elements, growing per the
    /// growth policy.
    ///
    /// # Panics
    ///
    /// Panics if the allocator cannot provide the storage.
    pub fn reserve(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve(additional) {
            fatal(&err, self.len(), additional);
        }
    }

    /// Make room for at least `additional` more elements, reporting allocator
    /// failure instead of panicking.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), SequenceError> {
        let required = self
            .len()
            .checked_add(additional)
            .ok_or(SequenceError::CapacityOverflow)?;
        if required <= self.capacity() {
            return Ok(());
        }
        let target = self.growth.next_capacity(self.capacity(), required);
        self.grow_to(target)
    }

    /// Make room for exactly `additional` more elements, ignoring the growth
    /// policy.
    ///
    /// # Panics
    ///
    /// Panics if the allocator cannot provide the storage.
    pub fn reserve_exact(&mut self, additional: usize) {
        let required = match self.len().checked_add(additional) {
            Some(required) => required,
            None => fatal(&SequenceError::CapacityOverflow, self.len(), additional),
        };
        if required > self.capacity() {
            self.grow_exact(required);
        }
    }

    /// Shrink storage to exactly `len` elements.
    ///
    /// No-op when capacity already equals length. Trimming an empty sequence
    /// releases its storage entirely. If the allocator cannot provide the
    /// smaller block, the current storage is kept.
    pub fn trim(&mut self) {
        let (old, new) = (self.capacity(), self.len());
        if old == new {
            return;
        }
        match self.buf.reallocate(new) {
            Ok(()) => trace!(old, new = self.capacity(), "sequence trimmed"),
            Err(err) => trace!(old, error = %err, "sequence trim kept existing storage"),
        }
    }

    fn grow_exact(&mut self, capacity: usize) {
        if let Err(err) = self.grow_to(capacity) {
            fatal(&err, self.len(), capacity.saturating_sub(self.len()));
        }
    }

    fn grow_to(&mut self, capacity: usize) -> Result<(), SequenceError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        let old = self.capacity();
        self.buf.reallocate(capacity)?;
        trace!(old, new = capacity, policy = %self.growth, "sequence grew");
        Ok(())
    }
}

/// Log an unrecoverable growth failure and abort the current operation.
#[cold]
fn fatal(err: &SequenceError, len: usize, additional: usize) -> ! {
    error!(error = %err, len, additional, "sequence cannot grow");
    panic!("{err}");
}

/// Validate removal targets against `len` and return them sorted ascending.
///
/// # Panics
///
/// Panics on an out-of-range or repeated index.
pub(crate) fn sorted_removal_targets(indices: &[usize], len: usize) -> Vec<usize> {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    if let Some(&max) = sorted.last() {
        assert!(max < len, "removal index (is {max}) should be < len (is {len})");
    }
    if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
        panic!("removal index {} given more than once", pair[0]);
    }
    sorted
}

/// Close the gaps left by removing the logical elements at `sorted` from
/// `items`, where each logical element is `width` items wide. Returns the
/// number of items kept.
///
/// One pass over the tail; equivalent to removing at `sorted[j] - j` in turn.
pub(crate) fn compact<T: Copy>(items: &mut [T], sorted: &[usize], width: usize) -> usize {
    let count = items.len() / width;
    let Some(&first) = sorted.first() else {
        return items.len();
    };
    let mut targets = sorted.iter().peekable();
    let mut write = first;
    for read in first..count {
        if targets.next_if_eq(&&read).is_some() {
            continue;
        }
        items.copy_within(read * width..(read + 1) * width, write * width);
        write += 1;
    }
    write * width
}

// ── Trait impls ─────────────────────────────────────────────────

impl<T: Copy> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, A: Allocator + Clone> Clone for Sequence<T, A> {
    fn clone(&self) -> Self {
        Sequence::from_slice_in(self.as_slice(), self.allocator().clone()).with_growth(self.growth)
    }
}

impl<T: Copy + fmt::Debug, A: Allocator> fmt::Debug for Sequence<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Copy + PartialEq, A: Allocator, B: Allocator> PartialEq<Sequence<T, B>>
    for Sequence<T, A>
{
    fn eq(&self, other: &Sequence<T, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Copy + Eq, A: Allocator> Eq for Sequence<T, A> {}

impl<T: Copy + PartialEq, A: Allocator> PartialEq<[T]> for Sequence<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Copy + PartialEq, A: Allocator, const N: usize> PartialEq<[T; N]> for Sequence<T, A> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Copy, A: Allocator> Index<usize> for Sequence<T, A> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Copy, A: Allocator> IndexMut<usize> for Sequence<T, A> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: Copy, A: Allocator> Extend<T> for Sequence<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for Sequence<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Copy> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Sequence::new();
        seq.extend(iter);
        seq
    }
}

impl<T: Copy> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Sequence::from_slice(&items)
    }
}

impl<T: Copy> From<&[T]> for Sequence<T> {
    fn from(items: &[T]) -> Self {
        Sequence::from_slice(items)
    }
}

impl<'a, T: Copy, A: Allocator> IntoIterator for &'a Sequence<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Copy, A: Allocator> IntoIterator for &'a mut Sequence<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concrete_insert_and_remove_many_scenario() {
        let mut s: Sequence<i32> = Sequence::with_capacity(15);
        s.append(&[4; 5]);
        assert_eq!(s.len(), 5);
        assert_eq!(s, [4, 4, 4, 4, 4]);

        s.insert(3, &[3]);
        assert_eq!(s.len(), 6);
        assert_eq!(s, [4, 4, 4, 3, 4, 4]);

        let removed = s.remove_many(&[3, 5]);
        assert_eq!(removed, vec![3, 4]);
        assert_eq!(s, [4, 4, 4, 4]);
        assert_eq!(s.len(), 4);
        assert_eq!(s.capacity(), 15);
    }

    #[test]
    fn remove_many_returns_values_in_caller_order() {
        let mut s = Sequence::from_slice(&[10, 11, 12, 13, 14, 15]);
        let removed = s.remove_many(&[4, 0, 2]);
        assert_eq!(removed, vec![14, 10, 12]);
        assert_eq!(s, [11, 13, 15]);
    }

    #[test]
    fn remove_many_empty_is_no_op() {
        let mut s = Sequence::from_slice(&[1, 2]);
        assert!(s.remove_many(&[]).is_empty());
        assert_eq!(s, [1, 2]);
    }

    #[test]
    #[should_panic(expected = "given more than once")]
    fn remove_many_rejects_duplicates() {
        let mut s = Sequence::from_slice(&[1, 2, 3]);
        s.remove_many(&[1, 1]);
    }

    #[test]
    fn remove_many_validates_before_mutating() {
        let mut s = Sequence::from_slice(&[1, 2, 3]);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            s.remove_many(&[0, 3]);
        }));
        assert!(result.is_err());
        assert_eq!(s, [1, 2, 3]);
    }

    #[test]
    fn exact_growth_tracks_length() {
        let mut s = Sequence::new().with_growth(GrowthPolicy::Exact);
        for i in 0..5u8 {
            s.push(i);
            assert_eq!(s.capacity(), s.len());
        }
    }

    #[test]
    fn doubling_growth_amortizes() {
        let mut s = Sequence::new();
        s.push(1u16);
        assert_eq!(s.capacity(), 4);
        s.append(&[2, 3, 4, 5]);
        assert_eq!(s.capacity(), 8);
    }

    #[test]
    fn insert_at_len_appends() {
        let mut s = Sequence::from_slice(&[1, 2]);
        s.insert(2, &[3, 4]);
        assert_eq!(s, [1, 2, 3, 4]);
    }

    #[test]
    fn insert_in_middle_shifts_tail() {
        let mut s = Sequence::from_slice(&[1, 5]);
        s.insert(1, &[2, 3, 4]);
        assert_eq!(s, [1, 2, 3, 4, 5]);
    }

    #[test]
    #[should_panic(expected = "insertion index (is 3) should be <= len (is 2)")]
    fn insert_past_len_panics() {
        let mut s = Sequence::from_slice(&[1, 2]);
        s.insert_one(3, 9);
    }

    #[test]
    fn remove_shifts_and_returns() {
        let mut s = Sequence::from_slice(&['a', 'b', 'c']);
        assert_eq!(s.remove(1), 'b');
        assert_eq!(s, ['a', 'c']);
    }

    #[test]
    #[should_panic(expected = "removal index (is 2) should be < len (is 2)")]
    fn remove_out_of_range_panics() {
        let mut s = Sequence::from_slice(&[1, 2]);
        s.remove(2);
    }

    #[test]
    #[should_panic]
    fn set_out_of_range_panics() {
        let mut s = Sequence::from_slice(&[1, 2]);
        s.set(2, 0);
    }

    #[test]
    fn get_and_set() {
        let mut s = Sequence::from_slice(&[1, 2, 3]);
        s.set(0, 7);
        assert_eq!(s.get(0), Some(&7));
        assert_eq!(s.get(3), None);
        *s.get_mut(2).unwrap() = 9;
        assert_eq!(s[2], 9);
    }

    #[test]
    fn from_slice_is_tight() {
        let s = Sequence::from_slice(&[1u32, 2, 3]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.capacity(), 3);
    }

    #[test]
    fn contains_and_sort() {
        let mut s = Sequence::from_slice(&[3, 1, 2]);
        assert!(s.contains(&2));
        assert!(!s.contains(&4));
        s.sort();
        assert_eq!(s, [1, 2, 3]);
        s.sort_by(|a, b| b.cmp(a));
        assert_eq!(s, [3, 2, 1]);
    }

    #[test]
    fn slice_is_an_independent_copy() {
        let s = Sequence::from_slice(&[1, 2, 3, 4]).with_growth(GrowthPolicy::Exact);
        let mut mid = s.slice(1, 3);
        assert_eq!(mid, [2, 3]);
        assert_eq!(mid.capacity(), 2);
        assert_eq!(mid.growth(), GrowthPolicy::Exact);
        mid.set(0, 99);
        assert_eq!(s, [1, 2, 3, 4]);
    }

    #[test]
    fn empty_slices_are_allowed() {
        let s = Sequence::from_slice(&[1, 2]);
        assert!(s.slice(0, 0).is_empty());
        assert!(s.slice(2, 2).is_empty());
    }

    #[test]
    #[should_panic]
    fn reversed_slice_panics() {
        let s = Sequence::from_slice(&[1, 2, 3]);
        let _ = s.slice(2, 1);
    }

    #[test]
    fn trim_releases_slack() {
        let mut s = Sequence::with_capacity(10);
        s.append(&[1, 2, 3]);
        s.trim();
        assert_eq!(s.capacity(), 3);
        assert_eq!(s, [1, 2, 3]);
        s.clear();
        s.trim();
        assert_eq!(s.capacity(), 0);
    }

    #[test]
    fn copy_out_fills_prefix() {
        let s = Sequence::from_slice(&[5, 6]);
        let mut dest = [0; 4];
        s.copy_out(&mut dest);
        assert_eq!(dest, [5, 6, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "destination holds 1 elements")]
    fn copy_out_too_small_panics() {
        let s = Sequence::from_slice(&[5, 6]);
        s.copy_out(&mut [0; 1]);
    }

    #[test]
    fn concat_appends_other() {
        let mut a = Sequence::from_slice(&[1, 2]);
        let b = Sequence::from_slice(&[3]);
        a.concat(&b);
        assert_eq!(a, [1, 2, 3]);
        assert_eq!(b, [3]);
    }

    #[test]
    fn pop_truncate_clear() {
        let mut s = Sequence::from_slice(&[1, 2, 3, 4]);
        assert_eq!(s.pop(), Some(4));
        s.truncate(1);
        assert_eq!(s, [1]);
        s.clear();
        assert_eq!(s.pop(), None);
        assert!(s.is_empty());
    }

    #[test]
    fn collect_extend_and_debug() {
        let mut s: Sequence<u8> = (1..=3).collect();
        s.extend(&[4, 5]);
        assert_eq!(format!("{s:?}"), "[1, 2, 3, 4, 5]");
        assert_eq!(s.to_vec(), vec![1, 2, 3, 4, 5]);
        let total: u32 = (&s).into_iter().map(|&b| u32::from(b)).sum();
        assert_eq!(total, 15);
    }

    #[test]
    fn zero_sized_elements() {
        let mut s: Sequence<()> = Sequence::new();
        s.append(&[(); 3]);
        s.insert_one(1, ());
        assert_eq!(s.len(), 4);
        assert_eq!(s.remove_many(&[0, 3]).len(), 2);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn try_reserve_reports_overflow() {
        let mut s: Sequence<u64> = Sequence::new();
        assert_eq!(
            s.try_reserve(usize::MAX),
            Err(SequenceError::CapacityOverflow)
        );
        s.push(1);
        assert_eq!(
            s.try_reserve(usize::MAX),
            Err(SequenceError::CapacityOverflow)
        );
    }

    #[test]
    fn compact_matches_sequential_removals() {
        let mut items = [0, 1, 2, 3, 4, 5, 6];
        let kept = compact(&mut items, &[1, 2, 5], 1);
        assert_eq!(&items[..kept], &[0, 3, 4, 6]);
    }

    #[test]
    fn compact_respects_width() {
        let mut items = [0, 0, 1, 1, 2, 2];
        let kept = compact(&mut items, &[0], 2);
        assert_eq!(&items[..kept], &[1, 1, 2, 2]);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn append_extends_by_batch(
                start in proptest::collection::vec(any::<i32>(), 0..32),
                batch in proptest::collection::vec(any::<i32>(), 0..32),
                exact in any::<bool>(),
            ) {
                let growth = if exact { GrowthPolicy::Exact } else { GrowthPolicy::Doubling };
                let mut s = Sequence::from_slice(&start).with_growth(growth);
                let before = s.len();
                s.append(&batch);
                prop_assert_eq!(s.len(), before + batch.len());
                prop_assert!(s.capacity() >= s.len());
                prop_assert_eq!(&s.as_slice()[..before], &start[..]);
                prop_assert_eq!(&s.as_slice()[before..], &batch[..]);
            }

            #[test]
            fn partition_law(
                items in proptest::collection::vec(any::<u16>(), 0..64),
                split in any::<prop::sample::Index>(),
            ) {
                let s = Sequence::from_slice(&items);
                let k = split.index(items.len() + 1);
                let mut left = s.slice(0, k);
                left.concat(&s.slice(k, s.len()));
                prop_assert_eq!(left, s);
            }

            #[test]
            fn trim_is_idempotent_and_growable(
                items in proptest::collection::vec(any::<u8>(), 0..64),
                extra in proptest::collection::vec(any::<u8>(), 1..16),
                slack in 0usize..32,
            ) {
                let mut s = Sequence::with_capacity(items.len() + slack);
                s.append(&items);
                s.trim();
                let once = (s.to_vec(), s.capacity());
                s.trim();
                prop_assert_eq!((s.to_vec(), s.capacity()), once);
                prop_assert_eq!(s.capacity(), items.len());

                s.append(&extra);
                prop_assert_eq!(&s.as_slice()[..items.len()], &items[..]);
                prop_assert_eq!(&s.as_slice()[items.len()..], &extra[..]);
            }

            #[test]
            fn remove_many_equals_adjusted_single_removals(
                items in proptest::collection::vec(any::<i64>(), 1..48),
                picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..16),
            ) {
                let mut indices: Vec<usize> = picks.iter().map(|p| p.index(items.len())).collect();
                indices.sort_unstable();
                indices.dedup();
                // Shuffle deterministically so the caller order is not sorted.
                indices.reverse();
                if indices.len() > 2 {
                    indices.swap(0, 1);
                }

                let mut bulk = Sequence::from_slice(&items);
                let removed = bulk.remove_many(&indices);

                let mut sorted = indices.clone();
                sorted.sort_unstable();
                let mut single = Sequence::from_slice(&items);
                for (j, &i) in sorted.iter().enumerate() {
                    single.remove(i - j);
                }

                prop_assert_eq!(&bulk, &single);
                let expected: Vec<i64> = indices.iter().map(|&i| items[i]).collect();
                prop_assert_eq!(removed, expected);
            }
        }
    }
}
