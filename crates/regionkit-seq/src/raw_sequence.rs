//! Byte-erased sequences for heterogeneous element types.
//!
//! [`RawSequence`] stores elements as fixed-width byte strings whose width is
//! only known at runtime. Prefer [`Sequence<T>`](crate::Sequence) whenever
//! the element type is known statically: it cannot mix up widths.

use std::cmp::Ordering;
use std::fmt;
use std::slice::ChunksExact;

use regionkit_core::{Allocator, SystemAllocator};

use crate::error::SequenceError;
use crate::growth::GrowthPolicy;
use crate::sequence::{compact, sorted_removal_targets, Sequence};

/// A growable list of fixed-width byte elements.
///
/// Capacity is tracked in whole elements: `capacity() == byte capacity /
/// element_size()` at all times. Equality in [`contains`](Self::contains) is
/// byte identity, so element types with padding must zero it to behave as
/// value equality.
pub struct RawSequence<A: Allocator = SystemAllocator> {
    bytes: Sequence<u8, A>,
    element_size: usize,
}

impl RawSequence {
    /// Create an empty sequence on the system allocator.
    ///
    /// # Panics
    ///
    /// Panics if `element_size` is zero.
    pub fn new(element_size: usize) -> Self {
        Self::new_in(element_size, SystemAllocator)
    }

    /// Create an empty sequence with room for `capacity` elements.
    pub fn with_capacity(element_size: usize, capacity: usize) -> Self {
        Self::with_capacity_in(element_size, capacity, SystemAllocator)
    }

    /// Create a sequence holding a copy of `bytes`, split into elements.
    pub fn from_bytes(element_size: usize, bytes: &[u8]) -> Self {
        Self::from_bytes_in(element_size, bytes, SystemAllocator)
    }
}

impl<A: Allocator> RawSequence<A> {
    /// Create an empty sequence that will draw storage from `alloc`.
    ///
    /// # Panics
    ///
    /// Panics if `element_size` is zero.
    pub fn new_in(element_size: usize, alloc: A) -> Self {
        assert!(element_size > 0, "element size must be non-zero");
        Self {
            bytes: Sequence::new_in(alloc),
            element_size,
        }
    }

    /// Create an empty sequence with room for `capacity` elements from `alloc`.
    pub fn with_capacity_in(element_size: usize, capacity: usize, alloc: A) -> Self {
        let mut seq = Self::new_in(element_size, alloc);
        let bytes = seq.byte_len(capacity);
        seq.bytes.reserve_exact(bytes);
        seq
    }

    /// Create a sequence in `alloc` holding a copy of `bytes`, with
    /// `capacity == len == bytes.len() / element_size`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len()` is not a multiple of `element_size`.
    pub fn from_bytes_in(element_size: usize, bytes: &[u8], alloc: A) -> Self {
        let mut seq = Self::new_in(element_size, alloc);
        seq.check_whole(bytes);
        seq.bytes.reserve_exact(bytes.len());
        seq.bytes.append(bytes);
        seq
    }

    /// Select the growth policy (builder style).
    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.bytes = self.bytes.with_growth(growth);
        self
    }

    /// Width of one element in bytes.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.bytes.len() / self.element_size
    }

    /// Whether the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of elements the current storage can hold without growing.
    pub fn capacity(&self) -> usize {
        self.bytes.capacity() / self.element_size
    }

    /// The growth policy in effect.
    pub fn growth(&self) -> GrowthPolicy {
        self.bytes.growth()
    }

    /// The allocator this sequence draws from.
    pub fn allocator(&self) -> &A {
        self.bytes.allocator()
    }

    /// All live elements as one contiguous byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// All live elements as one contiguous mutable byte slice.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.bytes.as_mut_slice()
    }

    /// Iterate over elements as byte slices.
    pub fn chunks(&self) -> ChunksExact<'_, u8> {
        self.as_bytes().chunks_exact(self.element_size)
    }

    /// The bytes of the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn get(&self, index: usize) -> &[u8] {
        let range = self.element_range(index);
        &self.as_bytes()[range]
    }

    /// The bytes of the element at `index`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> &mut [u8] {
        let range = self.element_range(index);
        &mut self.as_bytes_mut()[range]
    }

    /// Overwrite the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len` or `value` is not exactly one element wide.
    pub fn set(&mut self, index: usize, value: &[u8]) {
        self.check_single(value);
        self.get_mut(index).copy_from_slice(value);
    }

    /// Append one or more whole elements.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` is not a multiple of the element size.
    pub fn append(&mut self, values: &[u8]) {
        self.check_whole(values);
        self.reserve(values.len() / self.element_size);
        self.bytes.append(values);
    }

    /// Insert one or more whole elements so that they start at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len` or `values` is not made of whole elements.
    pub fn insert(&mut self, index: usize, values: &[u8]) {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        self.check_whole(values);
        self.reserve(values.len() / self.element_size);
        self.bytes.insert(index * self.element_size, values);
    }

    /// Remove the element at `index`, copying its bytes into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len` or `out` is not exactly one element wide.
    pub fn remove(&mut self, index: usize, out: &mut [u8]) {
        self.check_single(out);
        let range = self.element_range(index);
        out.copy_from_slice(&self.as_bytes()[range.clone()]);
        self.as_bytes_mut().copy_within(range.end.., range.start);
        self.bytes.truncate(self.bytes.len() - self.element_size);
    }

    /// Remove the elements at `indices` (any order), copying their bytes into
    /// `out` in the caller's order of `indices`.
    ///
    /// Same index adjustment as [`Sequence::remove_many`].
    ///
    /// # Panics
    ///
    /// Panics on an out-of-range or repeated index, or if `out` is shorter
    /// than `indices.len()` elements.
    pub fn remove_many(&mut self, indices: &[usize], out: &mut [u8]) {
        let width = self.element_size;
        let sorted = sorted_removal_targets(indices, self.len());
        assert!(
            out.len() >= indices.len() * width,
            "output holds {} bytes but {} elements of {width} bytes are removed",
            out.len(),
            indices.len()
        );
        for (slot, &i) in out.chunks_exact_mut(width).zip(indices) {
            slot.copy_from_slice(self.get(i));
        }
        let kept = compact(self.as_bytes_mut(), &sorted, width);
        self.bytes.truncate(kept);
    }

    /// Whether any element is byte-identical to `value`.
    pub fn contains(&self, value: &[u8]) -> bool {
        value.len() == self.element_size && self.chunks().any(|e| e == value)
    }

    /// Sort elements in place with a three-way comparator over their bytes.
    ///
    /// The sort is stable.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&[u8], &[u8]) -> Ordering,
    {
        let width = self.element_size;
        let bytes = self.as_bytes();
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| {
            compare(
                &bytes[a * width..(a + 1) * width],
                &bytes[b * width..(b + 1) * width],
            )
        });
        let sorted: Vec<u8> = order
            .iter()
            .flat_map(|&i| &bytes[i * width..(i + 1) * width])
            .copied()
            .collect();
        self.as_bytes_mut().copy_from_slice(&sorted);
    }

    /// Append every element of `other`.
    ///
    /// Returns [`SequenceError::ElementSizeMismatch`] and leaves both
    /// sequences untouched if the element sizes differ.
    pub fn concat<B: Allocator>(&mut self, other: &RawSequence<B>) -> Result<(), SequenceError> {
        if other.element_size != self.element_size {
            return Err(SequenceError::ElementSizeMismatch {
                expected: self.element_size,
                found: other.element_size,
            });
        }
        self.append(other.as_bytes());
        Ok(())
    }

    /// Copy elements `[start, end)` into a fresh sequence on a clone of this
    /// sequence's allocator.
    ///
    /// # Panics
    ///
    /// Panics unless `start <= end <= len`.
    pub fn slice(&self, start: usize, end: usize) -> RawSequence<A>
    where
        A: Clone,
    {
        let len = self.len();
        assert!(
            start <= end && end <= len,
            "slice [{start}, {end}) out of range for length {len}"
        );
        let width = self.element_size;
        RawSequence::from_bytes_in(
            width,
            &self.as_bytes()[start * width..end * width],
            self.allocator().clone(),
        )
        .with_growth(self.growth())
    }

    /// Shrink storage to exactly `len` elements.
    pub fn trim(&mut self) {
        self.bytes.trim();
    }

    /// Copy every element's bytes into the front of `dest`.
    ///
    /// # Panics
    ///
    /// Panics if `dest` is shorter than `len * element_size` bytes.
    pub fn copy_out(&self, dest: &mut [u8]) {
        self.bytes.copy_out(dest);
    }

    /// Make room for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics if the allocator cannot provide the storage.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len().saturating_add(additional);
        let capacity = self.capacity();
        if required <= capacity {
            return;
        }
        let target = self.growth().next_capacity(capacity, required);
        let more = self.byte_len(target) - self.bytes.len();
        self.bytes.reserve_exact(more);
    }

    fn byte_len(&self, elements: usize) -> usize {
        elements.saturating_mul(self.element_size)
    }

    fn element_range(&self, index: usize) -> std::ops::Range<usize> {
        let len = self.len();
        assert!(index < len, "index out of bounds: the len is {len} but the index is {index}");
        index * self.element_size..(index + 1) * self.element_size
    }

    fn check_single(&self, value: &[u8]) {
        assert_eq!(
            value.len(),
            self.element_size,
            "value is {} bytes but elements are {} bytes",
            value.len(),
            self.element_size
        );
    }

    fn check_whole(&self, values: &[u8]) {
        assert!(
            values.len() % self.element_size == 0,
            "{} bytes is not a whole number of {}-byte elements",
            values.len(),
            self.element_size
        );
    }
}

impl<A: Allocator + Clone> Clone for RawSequence<A> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            element_size: self.element_size,
        }
    }
}

impl<A: Allocator> fmt::Debug for RawSequence<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSequence")
            .field("element_size", &self.element_size)
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
