//! Error types shared by every allocator implementation.

use std::error::Error;
use std::fmt;

/// Errors returned through the [`Allocator`](crate::Allocator) plug-in interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The allocator cannot satisfy the request with its remaining space.
    Exhausted {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes still available.
        remaining: usize,
    },
    /// `reset` was called on an allocator flagged as non-resettable.
    NotResettable,
    /// The allocator (or handle) has no notion of a bulk reset.
    ResetUnsupported,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "allocator exhausted: requested {requested} bytes, {remaining} bytes remaining"
                )
            }
            Self::NotResettable => write!(f, "allocator is flagged as non-resettable"),
            Self::ResetUnsupported => write!(f, "allocator does not support reset"),
        }
    }
}

impl Error for AllocError {}
