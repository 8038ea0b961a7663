//! # Merkle Path Subsystem (IR-03)
//!
//! Authentication paths from an identity commitment to its group root, the
//! public input of a zero-knowledge membership proof.
//!
//! ## Architecture
//!
//! ```text
//! ir-03-merkle-paths/
//! ├── domain/     # Groups, MerkleTreeNode, MerklePath, PathError
//! ├── ports/      # MerklePathApi, TreeStore/TreeNodeStore, NodeHasher
//! ├── service.rs  # Bounded parent walk
//! └── adapters/   # Keccak hasher, incremental in-memory tree
//! ```
//!
//! ## Path Layout
//!
//! Levels are ordered from the leaf (level 0) upward. `path_elements[i]` is
//! the sibling at level `i` and `indices[i]` is `index mod 2` of the node on
//! the path at that level: `0` hashes as `H(node, sibling)`, `1` as
//! `H(sibling, node)`.
//!
//! ## Consistency
//!
//! A path is read from a single store snapshot, so concurrent insertions
//! never produce a mix of old and new pointers.

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryTreeStore, KeccakNodeHasher, TreeStoreError};
pub use domain::{
    known_groups, GroupId, GroupProvider, MerklePath, MerkleTreeNode, NodeKey, PathError,
    PoapGroupName, ReputationLevel, MAX_TREE_DEPTH,
};
pub use ports::{MerklePathApi, NodeHasher, TreeNodeStore, TreeStore};
pub use service::MerklePathService;
