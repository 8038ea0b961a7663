//! # Attestation Service
//!
//! Application service implementing `AttestationApi`.
//!
//! The backend signing key and the trusted signer address are injected at
//! construction. They usually match, but verification never derives the
//! trusted address from the key: an attestation is only accepted if it
//! recovers to the configured address.

use crate::domain::codec;
use crate::domain::ecdsa;
use crate::domain::entities::{AttestationFields, AttestationMessage};
use crate::domain::errors::AttestationError;
use crate::ports::inbound::AttestationApi;
use shared_crypto::Secp256k1KeyPair;
use shared_types::Address;
use tracing::debug;

/// Attestation Service.
pub struct AttestationService {
    keypair: Secp256k1KeyPair,
    trusted_address: Address,
}

impl AttestationService {
    /// Create a service with an explicit trusted signer address.
    pub fn new(keypair: Secp256k1KeyPair, trusted_address: Address) -> Self {
        Self {
            keypair,
            trusted_address,
        }
    }

    /// Create a service that trusts its own key.
    pub fn from_key(keypair: Secp256k1KeyPair) -> Self {
        let trusted_address = keypair.address();
        Self::new(keypair, trusted_address)
    }

    /// Address of the signing key.
    pub fn signer_address(&self) -> Address {
        self.keypair.address()
    }
}

impl AttestationApi for AttestationService {
    fn canonicalize(&self, fields: &AttestationFields) -> Result<String, AttestationError> {
        codec::canonicalize(fields)
    }

    fn decode(&self, message: &str) -> Result<AttestationMessage, AttestationError> {
        codec::decode(message)
    }

    fn sign(&self, message: &str) -> Result<String, AttestationError> {
        let signature = ecdsa::sign_message(&self.keypair, message)?;
        debug!(signer = %self.keypair.address(), "attestation signed");
        Ok(signature.to_hex())
    }

    fn verify(&self, message: &str, signature: &str) -> Result<(), AttestationError> {
        ecdsa::verify_message(message, signature, self.trusted_address)
    }

    fn trusted_address(&self) -> Address {
        self.trusted_address
    }
}
