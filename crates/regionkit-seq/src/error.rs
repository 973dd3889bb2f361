//! Error types for sequence operations.

use std::error::Error;
use std::fmt;

use regionkit_core::AllocError;

/// Errors that can occur during sequence operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SequenceError {
    /// Two byte-erased sequences with different element widths were combined.
    ElementSizeMismatch {
        /// Element size of the receiving sequence.
        expected: usize,
        /// Element size of the other operand.
        found: usize,
    },
    /// The requested capacity does not fit in `isize::MAX` bytes.
    CapacityOverflow,
    /// The bound allocator could not provide storage.
    Alloc(AllocError),
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElementSizeMismatch { expected, found } => {
                write!(
                    f,
                    "element size mismatch: expected {expected} bytes, found {found}"
                )
            }
            Self::CapacityOverflow => write!(f, "capacity overflow"),
            Self::Alloc(e) => write!(f, "sequence growth failed: {e}"),
        }
    }
}

impl Error for SequenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Alloc(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AllocError> for SequenceError {
    fn from(e: AllocError) -> Self {
        Self::Alloc(e)
    }
}
