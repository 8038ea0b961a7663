//! # Domain Errors

use thiserror::Error;

/// Errors that can occur while retrieving a Merkle path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// Provider/name pair is not in the group registry.
    #[error("The group {0} does not exist")]
    GroupNotFound(String),

    /// No leaf with this hash in the group.
    #[error("The identity commitment does not exist")]
    IdentityCommitmentNotFound,

    /// The parent chain does not end in exactly one root.
    #[error("Tree corruption in group {group_id}: {reason}")]
    TreeCorruption { group_id: String, reason: String },

    /// Store failure.
    #[error("Storage error: {0}")]
    Storage(String),
}
