//! Keccak-256 node hasher.

use shared_crypto::keccak256;
use shared_types::U256;

use crate::ports::outbound::NodeHasher;

/// `parent = keccak256(left_be32 || right_be32)`, read back as a big-endian
/// integer.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeccakNodeHasher;

impl NodeHasher for KeccakNodeHasher {
    fn hash_pair(&self, left: &U256, right: &U256) -> U256 {
        let mut preimage = [0u8; 64];
        left.to_big_endian(&mut preimage[..32]);
        right.to_big_endian(&mut preimage[32..]);
        U256::from_big_endian(&keccak256(&preimage))
    }
}
