//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::entities::{AttestationFields, AttestationMessage};
use crate::domain::errors::AttestationError;
use shared_types::Address;

/// Attestation signing and verification API.
///
/// Implementations hold the backend key and the trusted signer address and
/// must be thread-safe (`Send + Sync`).
pub trait AttestationApi: Send + Sync {
    /// Canonical message for a binding. Byte-stable for equal inputs.
    fn canonicalize(&self, fields: &AttestationFields) -> Result<String, AttestationError>;

    /// Parse a canonical message back into its fields.
    fn decode(&self, message: &str) -> Result<AttestationMessage, AttestationError>;

    /// Sign `message` with the backend key (EIP-191), returning `0x`-hex `r || s || v`.
    fn sign(&self, message: &str) -> Result<String, AttestationError>;

    /// Verify that the trusted backend signed `message`.
    ///
    /// # Errors
    ///
    /// - `InvalidAttestation` on malformed input
    /// - `SignatureMismatch` when the recovered signer is someone else
    fn verify(&self, message: &str, signature: &str) -> Result<(), AttestationError>;

    /// Address signatures are checked against.
    fn trusted_address(&self) -> Address;
}
