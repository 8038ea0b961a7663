//! # EIP-191 Message Signatures (secp256k1)
//!
//! Personal-message signing and signer recovery, compatible with
//! `personal_sign` / `signMessage` in Ethereum wallets.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must be STRICTLY LESS THAN SECP256K1_HALF_ORDER
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Constant-Time Operations**: Uses `subtle` crate for side-channel resistance

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use shared_crypto::{address_from_verifying_key, keccak256, RecoverableSignature, Secp256k1KeyPair};
use shared_types::{Address, Hash};
use subtle::{Choice, ConstantTimeEq};

use super::errors::AttestationError;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

const EIP191_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// EIP-191 personal-message digest:
/// `keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)`.
pub fn eip191_hash(message: &[u8]) -> Hash {
    let mut data = Vec::with_capacity(EIP191_PREFIX.len() + 20 + message.len());
    data.extend_from_slice(EIP191_PREFIX.as_bytes());
    data.extend_from_slice(message.len().to_string().as_bytes());
    data.extend_from_slice(message);
    keccak256(&data)
}

/// Sign `message` as an EIP-191 personal message.
pub fn sign_message(
    keypair: &Secp256k1KeyPair,
    message: &str,
) -> Result<RecoverableSignature, AttestationError> {
    keypair
        .sign_prehash_recoverable(&eip191_hash(message.as_bytes()))
        .map_err(|e| AttestationError::SigningFailed(e.to_string()))
}

/// Recover the address that signed `message` (EIP-191) with a hex signature.
///
/// # Errors
///
/// - `InvalidAttestation` for malformed hex, bad length, bad recovery id,
///   out-of-range scalars, or a failed recovery
/// - `MalleableSignature` for high-S signatures
pub fn recover_message_signer(message: &str, signature: &str) -> Result<Address, AttestationError> {
    let signature = RecoverableSignature::from_hex(signature)
        .map_err(|e| AttestationError::invalid(format!("signature: {e}")))?;
    recover_address(&eip191_hash(message.as_bytes()), &signature)
}

/// Verify that `message` was signed by `expected_signer`.
///
/// # Errors
///
/// `SignatureMismatch` when recovery succeeds for a different address, plus
/// every error of [`recover_message_signer`].
pub fn verify_message(
    message: &str,
    signature: &str,
    expected_signer: Address,
) -> Result<(), AttestationError> {
    let recovered = recover_message_signer(message, signature)?;

    if !bool::from(recovered.as_bytes().ct_eq(expected_signer.as_bytes())) {
        return Err(AttestationError::SignatureMismatch {
            expected: expected_signer,
            actual: recovered,
        });
    }

    Ok(())
}

/// Recover the signer's Ethereum address from a prehash and signature.
pub fn recover_address(
    message_hash: &Hash,
    signature: &RecoverableSignature,
) -> Result<Address, AttestationError> {
    let recovery_id = parse_recovery_id(signature.v())?;

    let (r, s) = (signature.r(), signature.s());
    if !is_valid_scalar(&r) || !is_valid_scalar(&s) {
        return Err(AttestationError::invalid("signature scalar out of range"));
    }
    if !is_low_s(&s) {
        return Err(AttestationError::MalleableSignature);
    }

    let sig = Signature::from_slice(&signature.as_bytes()[..64])
        .map_err(|_| AttestationError::invalid("signature encoding"))?;

    let recovered_key = VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|_| AttestationError::invalid("public key recovery failed"))?;

    Ok(address_from_verifying_key(&recovered_key))
}

fn parse_recovery_id(v: u8) -> Result<RecoveryId, AttestationError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(AttestationError::invalid(format!("recovery id {v}"))),
    };

    RecoveryId::try_from(id).map_err(|_| AttestationError::invalid(format!("recovery id {v}")))
}

/// Check if S value is in lower half of curve order (EIP-2 malleability protection).
///
/// Constant-time: the loop never exits early.
fn is_low_s(s: &[u8; 32]) -> bool {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        less |= not_decided & Choice::from((s[i] < SECP256K1_HALF_ORDER[i]) as u8);
        greater |= not_decided & Choice::from((s[i] > SECP256K1_HALF_ORDER[i]) as u8);
    }

    less.into()
}

/// Check if a scalar value is in valid range [1, n-1] for ECDSA.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        less |= not_decided & Choice::from((scalar[i] < SECP256K1_ORDER[i]) as u8);
        greater |= not_decided & Choice::from((scalar[i] > SECP256K1_ORDER[i]) as u8);
    }

    (!is_zero & less).into()
}

/// Invert S value for malleability testing: s' = n - s
#[cfg(test)]
fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}
