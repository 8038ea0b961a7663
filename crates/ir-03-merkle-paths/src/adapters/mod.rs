//! # Adapters Layer
//!
//! - `hasher`: Keccak-256 two-to-one node hash
//! - `memory`: incremental in-memory tree implementing `TreeStore`

pub mod hasher;
pub mod memory;

pub use hasher::KeccakNodeHasher;
pub use memory::{InMemoryTreeStore, TreeStoreError};
