//! # Merkle Path Service
//!
//! Walks explicit parent pointers from a leaf to the root, bounded by
//! `MAX_TREE_DEPTH`, collecting the sibling hash and index parity of every
//! node below the root.

use std::sync::Arc;

use shared_types::U256;
use tracing::{debug, warn};

use crate::domain::entities::{MerklePath, MAX_TREE_DEPTH};
use crate::domain::errors::PathError;
use crate::domain::groups::GroupId;
use crate::ports::inbound::MerklePathApi;
use crate::ports::outbound::{TreeNodeStore, TreeStore};

/// Merkle Path Service.
pub struct MerklePathService {
    store: Arc<dyn TreeStore>,
}

impl MerklePathService {
    pub fn new(store: Arc<dyn TreeStore>) -> Self {
        Self { store }
    }
}

impl MerklePathApi for MerklePathService {
    fn retrieve_path(
        &self,
        provider: &str,
        group_name: &str,
        id_commitment: U256,
    ) -> Result<MerklePath, PathError> {
        let group_id = GroupId::resolve(provider, group_name).map_err(|e| {
            warn!(%provider, %group_name, "path rejected: unknown group");
            e
        })?;

        let snapshot = self.store.snapshot();
        let path = walk(snapshot.as_ref(), &group_id, id_commitment)?;

        debug!(%group_id, depth = path.depth(), "path retrieved");
        Ok(path)
    }
}

fn walk(
    store: &dyn TreeNodeStore,
    group_id: &GroupId,
    id_commitment: U256,
) -> Result<MerklePath, PathError> {
    let corruption = |reason: String| {
        warn!(%group_id, %reason, "tree corruption");
        PathError::TreeCorruption {
            group_id: group_id.to_string(),
            reason,
        }
    };

    let mut node = store
        .find_by_group_and_hash(group_id, &id_commitment)?
        .ok_or(PathError::IdentityCommitmentNotFound)?;

    let mut path_elements = Vec::new();
    let mut indices = Vec::new();

    while let Some(parent_key) = node.parent {
        if path_elements.len() >= MAX_TREE_DEPTH {
            return Err(corruption(format!(
                "parent chain exceeds {MAX_TREE_DEPTH} levels"
            )));
        }

        let sibling = node.sibling_hash.ok_or_else(|| {
            corruption(format!("node {:?} has a parent but no sibling", node.key))
        })?;
        path_elements.push(sibling);
        indices.push(node.key.parity());

        let parent = store
            .find_by_key(group_id, parent_key)?
            .ok_or_else(|| corruption(format!("missing parent {parent_key:?}")))?;
        if parent.key.level <= node.key.level {
            return Err(corruption(format!(
                "level does not increase from {:?} to {:?}",
                node.key, parent.key
            )));
        }

        node = parent;
    }

    Ok(MerklePath {
        path_elements,
        indices,
        root: node.hash,
    })
}
