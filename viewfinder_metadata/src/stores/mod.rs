//! Store implementations.
//!
//! [`crate::MetadataStore`] is the seam where a real engine binding plugs
//! in. This module carries the in-memory reference implementation used in
//! tests and docs.

pub mod memory;

pub use memory::{MemoryStore, MemoryStoreError};
