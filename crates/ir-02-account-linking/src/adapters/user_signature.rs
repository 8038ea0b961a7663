//! EIP-191 wallet signatures authorizing a link.

use async_trait::async_trait;
use ir_01_attestation::recover_message_signer;
use shared_types::{Address, ChainId};
use tracing::debug;

use crate::ports::outbound::UserSignatureVerifier;

/// Accepts a signature iff it recovers to the address being linked.
///
/// The chain id is bound through the signed message itself, see
/// [`link_authorization_message`](crate::link_authorization_message).
#[derive(Debug, Default, Clone, Copy)]
pub struct Eip191UserSignatureVerifier;

impl Eip191UserSignatureVerifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UserSignatureVerifier for Eip191UserSignatureVerifier {
    async fn verify_signature(
        &self,
        address: Address,
        message: &str,
        signature: &str,
        chain_id: ChainId,
    ) -> bool {
        match recover_message_signer(message, signature) {
            Ok(signer) => signer == address,
            Err(e) => {
                debug!(%address, chain_id, error = %e, "user signature unrecoverable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link_authorization_message;
    use ir_01_attestation::sign_message;
    use shared_crypto::Secp256k1KeyPair;

    #[tokio::test]
    async fn test_accepts_own_signature_only() {
        let wallet = Secp256k1KeyPair::generate();
        let message = link_authorization_message(31337, wallet.address(), "account");
        let signature = sign_message(&wallet, &message).unwrap().to_hex();
        let verifier = Eip191UserSignatureVerifier::new();

        assert!(
            verifier
                .verify_signature(wallet.address(), &message, &signature, 31337)
                .await
        );
        assert!(
            !verifier
                .verify_signature(Address::from_bytes([9u8; 20]), &message, &signature, 31337)
                .await
        );
        assert!(
            !verifier
                .verify_signature(wallet.address(), &message, "signature", 31337)
                .await
        );
    }
}
