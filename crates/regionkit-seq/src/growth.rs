//! Capacity growth strategies.

use std::fmt;

/// How a sequence picks its new capacity when it runs out of room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GrowthPolicy {
    /// Grow to exactly the required length.
    ///
    /// Keeps `capacity == len` after every growth, at the cost of O(n²)
    /// element copies for n single-element pushes on an unsized sequence.
    Exact,
    /// Grow to at least twice the current capacity (amortized O(1) push).
    #[default]
    Doubling,
}

impl GrowthPolicy {
    /// Smallest non-zero capacity chosen by [`Doubling`](Self::Doubling).
    pub const MIN_DOUBLING_CAPACITY: usize = 4;

    /// Capacity to grow to when `current` elements are not enough to hold
    /// `required`.
    ///
    /// The result is always `>= required`.
    pub fn next_capacity(self, current: usize, required: usize) -> usize {
        match self {
            Self::Exact => required,
            Self::Doubling => required
                .max(current.saturating_mul(2))
                .max(Self::MIN_DOUBLING_CAPACITY),
        }
    }
}

impl fmt::Display for GrowthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Doubling => write!(f, "doubling"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_doubling() {
        assert_eq!(GrowthPolicy::default(), GrowthPolicy::Doubling);
    }

    #[test]
    fn exact_returns_required() {
        assert_eq!(GrowthPolicy::Exact.next_capacity(10, 11), 11);
        assert_eq!(GrowthPolicy::Exact.next_capacity(0, 1), 1);
    }

    #[test]
    fn doubling_has_a_floor_and_doubles() {
        assert_eq!(GrowthPolicy::Doubling.next_capacity(0, 1), 4);
        assert_eq!(GrowthPolicy::Doubling.next_capacity(4, 5), 8);
        assert_eq!(GrowthPolicy::Doubling.next_capacity(8, 100), 100);
    }

    #[test]
    fn doubling_saturates() {
        assert_eq!(
            GrowthPolicy::Doubling.next_capacity(usize::MAX / 2 + 1, usize::MAX / 2 + 2),
            usize::MAX
        );
    }
}
