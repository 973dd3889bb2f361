//! Core types and traits for regionkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! allocator plug-in interface that every container draws its storage
//! through, the error type allocators report, and the default
//! general-purpose [`SystemAllocator`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod error;
pub mod system;
pub mod traits;

pub use error::AllocError;
pub use system::SystemAllocator;
pub use traits::{Allocator, Release};
