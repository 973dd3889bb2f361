//! Test utilities and mock allocators for regionkit development.
//!
//! Provides instrumented implementations of the core
//! [`Allocator`](regionkit_core::Allocator) trait ([`CountingAllocator`],
//! [`FailingAllocator`]) and reusable element fixtures in [`fixtures`].

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
mod mock;

pub use fixtures::{by_key_desc, cmp_le_u32, Padded};
pub use mock::{CountingAllocator, FailingAllocator};
