//! Region-specific error types.

use std::error::Error;
use std::fmt;

use regionkit_core::AllocError;

/// Errors that can occur during region operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionError {
    /// Not enough space left between the cursor and the end of the buffer.
    Exhausted {
        /// Number of bytes requested.
        requested: usize,
        /// Total capacity of the region.
        capacity: usize,
        /// Cursor position at the time of the request.
        cursor: usize,
    },
    /// `reset` was called on a region created as non-resettable.
    NotResettable,
    /// A checkpoint marker lies above the current cursor.
    InvalidCheckpoint {
        /// The marker being restored.
        marker: usize,
        /// The cursor at the time of the rollback.
        cursor: usize,
    },
    /// A span or checkpoint from a generation whose bytes have since been
    /// rolled back or reset.
    StaleSpan {
        /// The generation encoded in the span or checkpoint.
        span_generation: u64,
        /// Number of leading bytes that survived every rollback since then.
        surviving: usize,
    },
    /// Construction parameters were rejected.
    InvalidConfig {
        /// Why the configuration is invalid.
        reason: String,
    },
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted {
                requested,
                capacity,
                cursor,
            } => {
                write!(
                    f,
                    "region exhausted: requested {requested} bytes at cursor {cursor}, capacity {capacity} bytes"
                )
            }
            Self::NotResettable => {
                write!(f, "reset called on a region flagged as non-resettable")
            }
            Self::InvalidCheckpoint { marker, cursor } => {
                write!(f, "checkpoint {marker} lies above cursor {cursor}")
            }
            Self::StaleSpan {
                span_generation,
                surviving,
            } => {
                write!(
                    f,
                    "stale span: generation {span_generation}, only the first {surviving} bytes survived"
                )
            }
            Self::InvalidConfig { reason } => write!(f, "invalid region config: {reason}"),
        }
    }
}

impl Error for RegionError {}

impl From<RegionError> for AllocError {
    fn from(err: RegionError) -> Self {
        match err {
            RegionError::Exhausted {
                requested,
                capacity,
                cursor,
            } => AllocError::Exhausted {
                requested,
                remaining: capacity.saturating_sub(cursor),
            },
            RegionError::NotResettable => AllocError::NotResettable,
            _ => AllocError::ResetUnsupported,
        }
    }
}
