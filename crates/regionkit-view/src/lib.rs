//! Non-owning iteration views over regionkit containers.
//!
//! A [`View`] is the `{pointer, count, element size}` description of a
//! container's elements, produced on demand through [`AsView`] without
//! copying. Traversal copies each element into a local, hands it to the
//! caller, and writes it back before advancing, so loops can mutate in place.
//!
//! # Lifecycle
//!
//! ```text
//! Unattached ──first step / push──▶ Active ──exhausted / unlink / pop──▶ Unlinked
//! ```
//!
//! An unlinked view drops its reference to the container and yields nothing.
//! Because a view mutably borrows its container, the container cannot be
//! resized or dropped while the view is alive.
//!
//! # Nesting
//!
//! Nested loops hold independent views, or push them onto a caller-owned
//! [`ViewStack`]. There is no global loop state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod raw;
pub mod stack;
pub mod state;
pub mod view;

pub use raw::{AsRawView, RawSlot, RawView};
pub use stack::ViewStack;
pub use state::ViewState;
pub use view::{AsView, Slot, View};
