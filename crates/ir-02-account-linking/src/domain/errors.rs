//! # Linking Errors
//!
//! `LinkError` aborts a link request. `UnlinkError` is carried inside an
//! `UnlinkOutcome`; its `Display` text is shown to the end user verbatim.

use ir_01_attestation::AttestationError;
use shared_crypto::CryptoError;
use thiserror::Error;

use super::entities::TokenStatus;

/// Failure of a persistent store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The id cannot name any record in this store
    #[error("Malformed id: {0}")]
    MalformedId(String),

    /// A record with the same key already exists
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Save of a record that was never created
    #[error("Record not found: {0}")]
    Missing(String),

    /// Backend unavailable or failed
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Failure reported by the badge contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OnchainError {
    /// The contract rejected the transaction
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Node or RPC failure
    #[error("Chain unavailable: {0}")]
    Unavailable(String),
}

/// Rejected token status change.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Invalid token transition {from:?} -> {to:?}")]
pub struct TransitionError {
    pub from: TokenStatus,
    pub to: TokenStatus,
}

/// Why a link request was refused.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Error retrieving web 2 account")]
    AccountLookupError(#[source] StoreError),

    #[error("Web 2 account not found")]
    AccountNotFound,

    #[error("Web 2 account already linked")]
    AlreadyLinked,

    #[error("Insufficient account's reputation")]
    InsufficientReputation,

    /// Canonicalizing or signing the attestation failed
    #[error("Error while signing attestation: {0}")]
    Attestation(#[from] AttestationError),

    #[error("Error while creating attestation")]
    EncryptionError(#[source] CryptoError),

    /// Passed through from the minter unmodified
    #[error(transparent)]
    OnchainError(#[from] OnchainError),

    /// Persisting the token or the account after minting failed
    #[error("Error while linking accounts: {0}")]
    Storage(#[source] StoreError),
}

/// Why an unlink request was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UnlinkError {
    #[error("Unable to find web2Account")]
    AccountNotFound,

    #[error("Web 2 account is not linked")]
    NotLinked,

    #[error("Invalid attestation provided")]
    InvalidAttestation,

    #[error("Attestation signature invalid")]
    SignatureInvalid,

    #[error("Web 2 accounts don't match")]
    AccountMismatch,

    #[error("Can't find token with decimalId {decimal_id}")]
    TokenNotFound { decimal_id: String },

    #[error("The on-chain token associated with the web 2 account you are connected with needs to be burned first.")]
    NotBurned,

    /// Store or collaborator fault. `reason` is logged, never shown.
    #[error("Error while un-linking accounts")]
    Internal { reason: String },
}

impl UnlinkError {
    pub(crate) fn internal(reason: impl ToString) -> Self {
        Self::Internal {
            reason: reason.to_string(),
        }
    }
}
