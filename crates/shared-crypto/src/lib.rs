//! # Shared Crypto - Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256, BLAKE3 KDF | Message digests, key derivation |
//! | `ecdsa` | secp256k1 | Backend attestation signing, address derivation |
//! | `sealed_box` | X25519 + XChaCha20-Poly1305 | Encrypting attestations to a user key |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic nonces, low-S normalization (EIP-2)
//! - **Sealed box**: fresh ephemeral key and 192-bit random nonce per message

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod sealed_box;

// Re-exports
pub use ecdsa::{address_from_verifying_key, RecoverableSignature, Secp256k1KeyPair};
pub use errors::CryptoError;
pub use hashing::{derive_symmetric_key, keccak256};
pub use sealed_box::{
    decrypt_message_with_salt, encrypt_message_with_salt, EncryptionPublicKey,
    EncryptionSecretKey, SaltedMessage, SealedBox,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
