//! # Outbound Ports (Driven Ports / SPI)

use crate::domain::entities::{MerkleTreeNode, NodeKey};
use crate::domain::errors::PathError;
use crate::domain::groups::GroupId;
use shared_types::U256;

/// Read access to stored tree nodes.
///
/// Implementations returned by [`TreeStore::snapshot`] must answer every
/// lookup from the same tree state.
pub trait TreeNodeStore {
    /// The leaf of `group_id` whose hash is `hash`.
    fn find_by_group_and_hash(
        &self,
        group_id: &GroupId,
        hash: &U256,
    ) -> Result<Option<MerkleTreeNode>, PathError>;

    /// The node of `group_id` at `key`.
    fn find_by_key(
        &self,
        group_id: &GroupId,
        key: NodeKey,
    ) -> Result<Option<MerkleTreeNode>, PathError>;
}

/// Source of consistent tree snapshots.
pub trait TreeStore: Send + Sync {
    /// A read view that does not observe concurrent insertions.
    fn snapshot(&self) -> Box<dyn TreeNodeStore + '_>;
}

/// Two-to-one node hash.
pub trait NodeHasher: Send + Sync {
    fn hash_pair(&self, left: &U256, right: &U256) -> U256;
}
