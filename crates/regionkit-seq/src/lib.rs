//! Growable sequences for regionkit.
//!
//! A [`Sequence<T, A>`] is a list of `Copy` elements whose storage comes
//! from any [`Allocator`](regionkit_core::Allocator): the system allocator by
//! default, or a shared `&Region` so that a whole phase of work can be
//! reclaimed at once. [`RawSequence`] is the byte-erased variant for element
//! types whose width is only known at runtime.
//!
//! # Growth
//!
//! When an insertion needs more room, the sequence asks its
//! [`GrowthPolicy`] for a new capacity. [`GrowthPolicy::Doubling`] (the
//! default) amortizes pushes; [`GrowthPolicy::Exact`] keeps capacity equal to
//! length after every growth. Allocators that can extend the current block
//! in place (a region whose topmost block it is) are asked to do so first.
//!
//! # Failure
//!
//! Out-of-range indices panic. Allocator exhaustion during growth is fatal
//! (logged, then a panic) unless the caller pre-sizes with
//! [`Sequence::try_reserve`]. Combining byte-erased sequences of different
//! widths is the one soft failure: [`RawSequence::concat`] returns
//! [`SequenceError::ElementSizeMismatch`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod error;
pub mod growth;
mod raw;
pub mod raw_sequence;
pub mod sequence;

pub use error::SequenceError;
pub use growth::GrowthPolicy;
pub use raw_sequence::RawSequence;
pub use sequence::Sequence;
