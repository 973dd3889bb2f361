//! Regionkit: bump-pointer regions, growable sequences and iteration views.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! regionkit sub-crates. For most users, adding `regionkit` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use regionkit::prelude::*;
//!
//! // One region per frame; sequences borrow it as their allocator.
//! let mut region = Region::new(4096, false).unwrap();
//! let frame = region.checkpoint();
//! {
//!     let mut hits: Sequence<u32, &Region> = Sequence::new_in(&region);
//!     hits.append(&[3, 1, 2]);
//!     hits.sort();
//!     hits.as_view().for_each(|h| *h *= 10);
//!     assert_eq!(hits, [10, 20, 30]);
//! }
//! // Everything the frame allocated is reclaimed at once.
//! region.rollback(frame).unwrap();
//! assert_eq!(region.used(), 0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`allocator`] | `regionkit-core` | `Allocator` trait, `SystemAllocator`, `AllocError` |
//! | [`arena`] | `regionkit-arena` | `Region`, `Span`, `Checkpoint`, `RegionConfig` |
//! | [`seq`] | `regionkit-seq` | `Sequence`, `RawSequence`, `GrowthPolicy` |
//! | [`view`] | `regionkit-view` | `View`, `RawView`, `ViewStack` |
//! | [`logging`] | (this crate) | `tracing` subscriber setup |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod logging;

/// The allocator interface (`regionkit-core`).
///
/// Implement [`allocator::Allocator`] to plug a custom memory source into
/// [`seq::Sequence`] and [`seq::RawSequence`].
pub use regionkit_core as allocator;

/// Bump-pointer regions (`regionkit-arena`).
///
/// [`arena::Region`] hands out [`arena::Span`]s through `&mut self` and acts
/// as an [`allocator::Allocator`] through `&self`.
pub use regionkit_arena as arena;

/// Growable contiguous sequences (`regionkit-seq`).
pub use regionkit_seq as seq;

/// Iteration views over sequences and slices (`regionkit-view`).
pub use regionkit_view as view;

/// Common imports for typical regionkit usage.
///
/// ```rust
/// use regionkit::prelude::*;
/// ```
pub mod prelude {
    // Allocation
    pub use regionkit_core::{Allocator, SystemAllocator};

    // Regions
    pub use regionkit_arena::{Checkpoint, Region, RegionConfig, Span};

    // Sequences
    pub use regionkit_seq::{GrowthPolicy, RawSequence, Sequence};

    // Views
    pub use regionkit_view::{AsRawView, AsView, View, ViewStack};

    // Errors
    pub use regionkit_arena::RegionError;
    pub use regionkit_core::AllocError;
    pub use regionkit_seq::SequenceError;
}
