//! # Domain Layer
//!
//! Group registry, tree nodes and authentication paths. No I/O.

pub mod entities;
pub mod errors;
pub mod groups;

pub use entities::{MerklePath, MerkleTreeNode, NodeKey, MAX_TREE_DEPTH};
pub use errors::PathError;
pub use groups::{known_groups, GroupId, GroupProvider, PoapGroupName, ReputationLevel};
