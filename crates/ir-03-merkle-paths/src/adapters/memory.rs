//! In-Memory Tree Store
//!
//! Fixed-depth incremental Merkle trees, one per group. Empty subtrees hash
//! to precomputed zero values, so only nodes on the path of an inserted leaf
//! are materialized.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use shared_types::U256;
use thiserror::Error;
use tracing::debug;

use crate::domain::entities::{MerkleTreeNode, NodeKey, MAX_TREE_DEPTH};
use crate::domain::errors::PathError;
use crate::domain::groups::GroupId;
use crate::ports::outbound::{NodeHasher, TreeNodeStore, TreeStore};

/// Errors raised while building trees.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeStoreError {
    #[error("Tree depth {depth} outside 1..={max}")]
    InvalidDepth { depth: usize, max: usize },

    #[error("Tree is full ({capacity} leaves)")]
    TreeFull { capacity: u64 },

    #[error("Leaf {0} already present in group")]
    DuplicateLeaf(U256),
}

#[derive(Default)]
struct GroupTree {
    nodes: HashMap<NodeKey, MerkleTreeNode>,
    leaves: HashMap<U256, NodeKey>,
    next_index: u64,
}

/// In-memory tree store for testing and local runs.
pub struct InMemoryTreeStore {
    depth: usize,
    hasher: Arc<dyn NodeHasher>,
    zeros: Vec<U256>,
    groups: RwLock<HashMap<GroupId, GroupTree>>,
}

impl InMemoryTreeStore {
    /// Create a store whose trees have `depth` levels above the leaves.
    pub fn new(depth: usize, hasher: Arc<dyn NodeHasher>) -> Result<Self, TreeStoreError> {
        if depth == 0 || depth > MAX_TREE_DEPTH {
            return Err(TreeStoreError::InvalidDepth {
                depth,
                max: MAX_TREE_DEPTH,
            });
        }

        let mut zeros = Vec::with_capacity(depth + 1);
        zeros.push(U256::zero());
        for level in 0..depth {
            let below = zeros[level];
            zeros.push(hasher.hash_pair(&below, &below));
        }

        Ok(Self {
            depth,
            hasher,
            zeros,
            groups: RwLock::new(HashMap::new()),
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn capacity(&self) -> u64 {
        1u64 << self.depth
    }

    /// Number of leaves in `group_id`.
    pub fn size(&self, group_id: &GroupId) -> u64 {
        self.groups
            .read()
            .get(group_id)
            .map(|tree| tree.next_index)
            .unwrap_or(0)
    }

    /// Current root of `group_id`, `None` before its first leaf.
    pub fn root(&self, group_id: &GroupId) -> Option<U256> {
        let root_key = NodeKey::new(self.depth as u8, 0);
        self.groups
            .read()
            .get(group_id)
            .and_then(|tree| tree.nodes.get(&root_key))
            .map(|node| node.hash)
    }

    /// Append an identity commitment at the next free leaf index.
    ///
    /// Rewrites every node on the leaf's path together with the sibling
    /// hashes their neighbours hold, under one write lock.
    pub fn append_leaf(&self, group_id: &GroupId, leaf: U256) -> Result<NodeKey, TreeStoreError> {
        let mut groups = self.groups.write();
        let tree = groups.entry(group_id.clone()).or_default();

        if tree.leaves.contains_key(&leaf) {
            return Err(TreeStoreError::DuplicateLeaf(leaf));
        }
        if tree.next_index >= self.capacity() {
            return Err(TreeStoreError::TreeFull {
                capacity: self.capacity(),
            });
        }

        let leaf_key = NodeKey::new(0, tree.next_index);
        let mut key = leaf_key;
        let mut hash = leaf;

        for level in 0..=self.depth {
            if level == self.depth {
                tree.nodes.insert(
                    key,
                    MerkleTreeNode {
                        group_id: group_id.clone(),
                        key,
                        hash,
                        sibling_hash: None,
                        parent: None,
                    },
                );
                break;
            }

            let sibling_key = key.sibling();
            let sibling_hash = match tree.nodes.get_mut(&sibling_key) {
                Some(sibling) => {
                    sibling.sibling_hash = Some(hash);
                    sibling.hash
                }
                None => self.zeros[level],
            };

            tree.nodes.insert(
                key,
                MerkleTreeNode {
                    group_id: group_id.clone(),
                    key,
                    hash,
                    sibling_hash: Some(sibling_hash),
                    parent: Some(key.parent()),
                },
            );

            hash = if key.parity() == 0 {
                self.hasher.hash_pair(&hash, &sibling_hash)
            } else {
                self.hasher.hash_pair(&sibling_hash, &hash)
            };
            key = key.parent();
        }

        tree.leaves.insert(leaf, leaf_key);
        tree.next_index += 1;

        debug!(%group_id, index = leaf_key.index, "leaf appended");
        Ok(leaf_key)
    }
}

/// Read view holding the store lock for its lifetime.
struct Snapshot<'a> {
    groups: RwLockReadGuard<'a, HashMap<GroupId, GroupTree>>,
}

impl TreeNodeStore for Snapshot<'_> {
    fn find_by_group_and_hash(
        &self,
        group_id: &GroupId,
        hash: &U256,
    ) -> Result<Option<MerkleTreeNode>, PathError> {
        Ok(self.groups.get(group_id).and_then(|tree| {
            tree.leaves
                .get(hash)
                .and_then(|key| tree.nodes.get(key))
                .cloned()
        }))
    }

    fn find_by_key(
        &self,
        group_id: &GroupId,
        key: NodeKey,
    ) -> Result<Option<MerkleTreeNode>, PathError> {
        Ok(self
            .groups
            .get(group_id)
            .and_then(|tree| tree.nodes.get(&key))
            .cloned())
    }
}

impl TreeStore for InMemoryTreeStore {
    fn snapshot(&self) -> Box<dyn TreeNodeStore + '_> {
        Box::new(Snapshot {
            groups: self.groups.read(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::KeccakNodeHasher;

    fn store(depth: usize) -> InMemoryTreeStore {
        InMemoryTreeStore::new(depth, Arc::new(KeccakNodeHasher)).unwrap()
    }

    fn group() -> GroupId {
        GroupId::resolve("github", "SILVER").unwrap()
    }

    #[test]
    fn test_depth_bounds() {
        let hasher: Arc<dyn NodeHasher> = Arc::new(KeccakNodeHasher);
        assert!(matches!(
            InMemoryTreeStore::new(0, hasher.clone()),
            Err(TreeStoreError::InvalidDepth { .. })
        ));
        assert!(matches!(
            InMemoryTreeStore::new(MAX_TREE_DEPTH + 1, hasher.clone()),
            Err(TreeStoreError::InvalidDepth { .. })
        ));
        assert!(InMemoryTreeStore::new(MAX_TREE_DEPTH, hasher).is_ok());
    }

    #[test]
    fn test_root_matches_full_recomputation() {
        let store = store(2);
        let hasher = KeccakNodeHasher;
        let leaves: Vec<U256> = (1..=3u64).map(U256::from).collect();
        for leaf in &leaves {
            store.append_leaf(&group(), *leaf).unwrap();
        }

        let left = hasher.hash_pair(&leaves[0], &leaves[1]);
        let right = hasher.hash_pair(&leaves[2], &U256::zero());
        assert_eq!(store.root(&group()), Some(hasher.hash_pair(&left, &right)));
        assert_eq!(store.size(&group()), 3);
    }

    #[test]
    fn test_earlier_leaf_sees_new_sibling() {
        let store = store(3);
        store.append_leaf(&group(), U256::from(7)).unwrap();
        store.append_leaf(&group(), U256::from(8)).unwrap();

        let snapshot = store.snapshot();
        let first = snapshot
            .find_by_group_and_hash(&group(), &U256::from(7))
            .unwrap()
            .unwrap();

        assert_eq!(first.sibling_hash, Some(U256::from(8)));
        assert_eq!(first.parent, Some(NodeKey::new(1, 0)));
    }

    #[test]
    fn test_root_has_no_parent_or_sibling() {
        let store = store(2);
        store.append_leaf(&group(), U256::one()).unwrap();

        let root = store
            .snapshot()
            .find_by_key(&group(), NodeKey::new(2, 0))
            .unwrap()
            .unwrap();

        assert_eq!(root.parent, None);
        assert_eq!(root.sibling_hash, None);
    }

    #[test]
    fn test_duplicate_and_full() {
        let store = store(1);
        store.append_leaf(&group(), U256::one()).unwrap();

        assert_eq!(
            store.append_leaf(&group(), U256::one()),
            Err(TreeStoreError::DuplicateLeaf(U256::one()))
        );

        store.append_leaf(&group(), U256::from(2)).unwrap();
        assert_eq!(
            store.append_leaf(&group(), U256::from(3)),
            Err(TreeStoreError::TreeFull { capacity: 2 })
        );
    }

    #[test]
    fn test_groups_are_isolated() {
        let store = store(2);
        let other = GroupId::resolve("poap", "DEVCON_4").unwrap();
        store.append_leaf(&group(), U256::one()).unwrap();

        assert_eq!(store.root(&other), None);
        assert!(store
            .snapshot()
            .find_by_group_and_hash(&other, &U256::one())
            .unwrap()
            .is_none());
        // Same commitment may join another group.
        assert!(store.append_leaf(&other, U256::one()).is_ok());
    }
}
