//! # Attestation Errors

use shared_types::Address;
use thiserror::Error;

/// Errors that can occur while encoding, signing or verifying attestations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttestationError {
    /// Malformed message, payload or signature; nothing could be recovered
    #[error("Invalid attestation: {0}")]
    InvalidAttestation(String),

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Recovery succeeded but the signer is not the trusted backend
    #[error("Signature mismatch: expected {expected}, recovered {actual}")]
    SignatureMismatch { expected: Address, actual: Address },

    /// The backend key could not produce a signature
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Canonical serialization failed
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl AttestationError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidAttestation(reason.into())
    }
}
