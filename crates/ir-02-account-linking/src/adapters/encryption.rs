//! Salted sealed-box encryption of attestations.

use shared_crypto::{encrypt_message_with_salt, CryptoError};

use crate::ports::outbound::AttestationEncryptor;

/// Seals attestations to the user's X25519 key (`0x`-hex).
///
/// The output is the JSON sealed box; the user opens it to obtain the
/// `{"salt","message"}` document expected by unlinking.
#[derive(Debug, Default, Clone, Copy)]
pub struct SealedBoxEncryptor;

impl SealedBoxEncryptor {
    pub fn new() -> Self {
        Self
    }
}

impl AttestationEncryptor for SealedBoxEncryptor {
    fn encrypt(&self, public_key: &str, plaintext: &str) -> Result<String, CryptoError> {
        encrypt_message_with_salt(public_key, plaintext)
    }
}
