//! Bump-pointer region allocation for regionkit.
//!
//! A [`Region`] owns one contiguous buffer and hands out byte ranges by
//! advancing a cursor. There is no per-allocation metadata: space comes back
//! only through [`Region::rollback`] to an earlier [`Checkpoint`] (stack
//! discipline) or through [`Region::reset`].
//!
//! # Architecture
//!
//! ```text
//! Region
//! ├── RawBuffer        (zero-filled, aligned, the only unsafe code)
//! ├── cursor: Cell     (bumped by both allocation paths)
//! └── GenerationLog    (one floor per rollback/reset, stale-span checks)
//! ```
//!
//! # Two allocation paths
//!
//! - **Handle path** (`&mut Region`): [`Region::allocate`] returns a
//!   [`Span`] tagged with the current generation. Spans are resolved with
//!   [`Region::bytes`], which rejects spans whose bytes were discarded by a
//!   later rollback or reset.
//! - **Shared path** (`&Region` as [`regionkit_core::Allocator`]): lets
//!   growable containers borrow the region. Exhaustion is reported as
//!   [`AllocError::Exhausted`](regionkit_core::AllocError::Exhausted) and
//!   never triggers a reset, since `reset` needs `&mut self`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
mod generation;
pub mod handle;
mod raw;
pub mod region;

// Public re-exports for the primary API surface.
pub use config::RegionConfig;
pub use error::RegionError;
pub use handle::{Checkpoint, Span};
pub use raw::align_up;
pub use region::Region;
