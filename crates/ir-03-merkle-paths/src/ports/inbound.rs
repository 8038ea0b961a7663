//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::MerklePath;
use crate::domain::errors::PathError;
use shared_types::U256;

/// Merkle path retrieval API.
pub trait MerklePathApi: Send + Sync {
    /// Authentication path of `id_commitment` in group `<provider>_<group_name>`.
    ///
    /// # Errors
    /// * `GroupNotFound` - the group is not in the registry
    /// * `IdentityCommitmentNotFound` - no such leaf in the group
    /// * `TreeCorruption` - the parent chain does not end in a single root
    fn retrieve_path(
        &self,
        provider: &str,
        group_name: &str,
        id_commitment: U256,
    ) -> Result<MerklePath, PathError>;
}
