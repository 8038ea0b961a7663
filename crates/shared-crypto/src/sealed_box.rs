//! # Sealed Boxes
//!
//! Anonymous public-key encryption: X25519 key agreement with a fresh
//! ephemeral key, BLAKE3 key derivation, XChaCha20-Poly1305 AEAD.
//!
//! The envelope mirrors the shape wallets use for `eth_decrypt`
//! (`version`, `nonce`, `ephemPublicKey`, `ciphertext`), hex encoded.

use crate::hashing::derive_symmetric_key;
use crate::CryptoError;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroize;

/// Envelope version tag.
pub const SEALED_BOX_VERSION: &str = "x25519-xchacha20-poly1305";

const KDF_CONTEXT: &str = "interrep sealed box v1 symmetric key";

/// Recipient's X25519 encryption public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncryptionPublicKey([u8; 32]);

impl EncryptionPublicKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a `0x`-prefixed (or bare) 64 hex digit key.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(digits).map_err(|_| CryptoError::InvalidPublicKey)?;
        let bytes: [u8; 32] = raw
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: 32,
                actual: raw.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex form accepted by [`EncryptionPublicKey::from_hex`].
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

/// Recipient's X25519 secret key.
pub struct EncryptionSecretKey(StaticSecret);

impl EncryptionSecretKey {
    /// Generate random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let secret = StaticSecret::from(bytes);
        bytes.zeroize();
        Self(secret)
    }

    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(StaticSecret::from(bytes))
    }

    /// Matching public key.
    pub fn public_key(&self) -> EncryptionPublicKey {
        EncryptionPublicKey(PublicKey::from(&self.0).to_bytes())
    }
}

/// Encrypted payload as stored on a token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedBox {
    /// Always [`SEALED_BOX_VERSION`].
    pub version: String,
    /// 24-byte nonce, hex.
    pub nonce: String,
    /// Sender's one-time X25519 public key, hex.
    pub ephem_public_key: String,
    /// AEAD ciphertext with tag, hex.
    pub ciphertext: String,
}

/// Plaintext wrapper adding a random salt, so equal messages never seal alike.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaltedMessage {
    /// Random `0x`-hex salt.
    pub salt: String,
    /// Caller's message.
    pub message: String,
}

/// Seal `plaintext` to `recipient`.
///
/// # Errors
///
/// `CryptoError::InvalidPublicKey` if the key is a low-order point.
pub fn seal(recipient: &EncryptionPublicKey, plaintext: &[u8]) -> Result<SealedBox, CryptoError> {
    let ephemeral = EncryptionSecretKey::generate();
    let ephemeral_public = ephemeral.public_key();

    let mut key = box_key(&ephemeral.0, recipient, &ephemeral_public, recipient)?;
    let cipher = XChaCha20Poly1305::new((&key).into());
    key.zeroize();

    let mut nonce = [0u8; 24];
    rand::thread_rng().fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    Ok(SealedBox {
        version: SEALED_BOX_VERSION.to_string(),
        nonce: hex::encode(nonce),
        ephem_public_key: hex::encode(ephemeral_public.as_bytes()),
        ciphertext: hex::encode(ciphertext),
    })
}

/// Open a sealed box with the recipient's secret key.
///
/// # Errors
///
/// `CryptoError::DecryptionFailed` on a wrong key, tampering, or a malformed envelope.
pub fn open(secret: &EncryptionSecretKey, sealed: &SealedBox) -> Result<Vec<u8>, CryptoError> {
    if sealed.version != SEALED_BOX_VERSION {
        return Err(CryptoError::DecryptionFailed(format!(
            "unsupported version {}",
            sealed.version
        )));
    }

    let ephemeral_public = EncryptionPublicKey::from_hex(&sealed.ephem_public_key)?;
    let nonce: [u8; 24] = hex::decode(&sealed.nonce)
        .ok()
        .and_then(|n| n.try_into().ok())
        .ok_or_else(|| CryptoError::DecryptionFailed("malformed nonce".to_string()))?;
    let ciphertext = hex::decode(&sealed.ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed("malformed ciphertext".to_string()))?;

    let recipient = secret.public_key();
    let mut key = box_key(&secret.0, &ephemeral_public, &ephemeral_public, &recipient)?;
    let cipher = XChaCha20Poly1305::new((&key).into());
    key.zeroize();

    cipher
        .decrypt(XNonce::from_slice(&nonce), ciphertext.as_slice())
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
}

/// Wrap `message` with a fresh salt and seal it to a hex encoded public key.
///
/// Returns the JSON form of the [`SealedBox`].
pub fn encrypt_message_with_salt(public_key_hex: &str, message: &str) -> Result<String, CryptoError> {
    let recipient = EncryptionPublicKey::from_hex(public_key_hex)?;

    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    let salted = SaltedMessage {
        salt: format!("0x{}", hex::encode(salt)),
        message: message.to_string(),
    };
    let plaintext = serde_json::to_vec(&salted)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let sealed = seal(&recipient, &plaintext)?;
    serde_json::to_string(&sealed).map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
}

/// Open the JSON envelope from [`encrypt_message_with_salt`].
///
/// Returns the salted JSON document `{"salt":..,"message":..}` verbatim.
pub fn decrypt_message_with_salt(
    secret: &EncryptionSecretKey,
    encrypted: &str,
) -> Result<String, CryptoError> {
    let sealed: SealedBox = serde_json::from_str(encrypted)
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))?;
    let plaintext = open(secret, &sealed)?;
    String::from_utf8(plaintext).map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
}

/// Shared symmetric key bound to both public keys of the exchange.
fn box_key(
    own_secret: &StaticSecret,
    their_public: &EncryptionPublicKey,
    ephemeral_public: &EncryptionPublicKey,
    recipient_public: &EncryptionPublicKey,
) -> Result<[u8; 32], CryptoError> {
    let shared = own_secret.diffie_hellman(&PublicKey::from(*their_public.as_bytes()));
    if !shared.was_contributory() {
        return Err(CryptoError::InvalidPublicKey);
    }

    let mut material = [0u8; 96];
    material[..32].copy_from_slice(shared.as_bytes());
    material[32..64].copy_from_slice(ephemeral_public.as_bytes());
    material[64..].copy_from_slice(recipient_public.as_bytes());
    let key = derive_symmetric_key(KDF_CONTEXT, &material);
    material.zeroize();

    Ok(key)
}
