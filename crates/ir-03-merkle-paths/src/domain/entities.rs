//! # Domain Entities
//!
//! - [`MerkleTreeNode`]: a stored node with its sibling hash and parent pointer
//! - [`MerklePath`]: leaf-to-root authentication path
//!
//! Hashes are field elements carried as `U256` and serialized as decimal
//! strings, the form proving tools consume.

use serde::{Deserialize, Serialize};
use shared_types::U256;

use super::groups::GroupId;
use crate::ports::outbound::NodeHasher;

/// Upper bound on tree depth. Parent walks never take more steps than this.
pub const MAX_TREE_DEPTH: usize = 32;

/// Position of a node: `level` 0 holds the leaves, `index` counts from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey {
    pub level: u8,
    pub index: u64,
}

impl NodeKey {
    pub const fn new(level: u8, index: u64) -> Self {
        Self { level, index }
    }

    /// `index mod 2`: 0 for a left child, 1 for a right child.
    pub fn parity(&self) -> u8 {
        (self.index % 2) as u8
    }

    pub fn sibling(&self) -> NodeKey {
        NodeKey::new(self.level, self.index ^ 1)
    }

    pub fn parent(&self) -> NodeKey {
        NodeKey::new(self.level + 1, self.index / 2)
    }
}

/// A stored tree node.
///
/// Every non-root node has a parent and a sibling hash. The root has neither
/// parent nor sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTreeNode {
    pub group_id: GroupId,
    pub key: NodeKey,
    pub hash: U256,
    pub sibling_hash: Option<U256>,
    pub parent: Option<NodeKey>,
}

/// Authentication path of a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerklePath {
    #[serde(with = "decimal_vec")]
    pub path_elements: Vec<U256>,
    pub indices: Vec<u8>,
    #[serde(with = "decimal")]
    pub root: U256,
}

impl MerklePath {
    /// Number of levels between the leaf and the root.
    pub fn depth(&self) -> usize {
        self.path_elements.len()
    }

    /// Recompute the root from `leaf` and compare.
    pub fn verify(&self, leaf: U256, hasher: &dyn NodeHasher) -> bool {
        if self.path_elements.len() != self.indices.len() {
            return false;
        }

        let mut current = leaf;
        for (sibling, index) in self.path_elements.iter().zip(&self.indices) {
            current = match index {
                0 => hasher.hash_pair(&current, sibling),
                1 => hasher.hash_pair(sibling, &current),
                _ => return false,
            };
        }

        current == self.root
    }
}

mod decimal {
    use serde::{Deserialize, Deserializer, Serializer};
    use shared_types::U256;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        U256::from_dec_str(&raw).map_err(|e| serde::de::Error::custom(format!("{e:?}")))
    }
}

mod decimal_vec {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};
    use shared_types::U256;

    pub fn serialize<S: Serializer>(values: &[U256], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&value.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<U256>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|raw| U256::from_dec_str(raw).map_err(|e| serde::de::Error::custom(format!("{e:?}"))))
            .collect()
    }
}
