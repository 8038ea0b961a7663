//! # Hashing
//!
//! Keccak-256 for everything that must match the EVM, BLAKE3 for local key
//! derivation.

use sha3::{Digest, Keccak256};
use shared_types::Hash;

/// Keccak-256 hash (the EVM's `keccak256`).
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive a 256-bit symmetric key from shared key material.
///
/// `context` must be a hardcoded, globally unique string per use site.
pub fn derive_symmetric_key(context: &str, material: &[u8]) -> [u8; 32] {
    blake3::derive_key(context, material)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_derive_key_separates_contexts() {
        let a = derive_symmetric_key("interrep test a", b"material");
        let b = derive_symmetric_key("interrep test b", b"material");
        assert_ne!(a, b);
        assert_eq!(a, derive_symmetric_key("interrep test a", b"material"));
    }
}
