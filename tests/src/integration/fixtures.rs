//! Shared fixtures: a runtime container plus the user's wallet and
//! encryption key.

use std::sync::Arc;

use interrep_runtime::{RuntimeConfig, ServiceContainer};
use ir_01_attestation::sign_message;
use ir_02_account_linking::{
    link_authorization_message, LinkRequest, Token, Web2Account, Web2AccountStore,
};
use shared_crypto::{decrypt_message_with_salt, EncryptionSecretKey, Secp256k1KeyPair};
use shared_types::{BasicReputation, Web2Provider};

/// Backend signing key used by every scenario.
pub const BACKEND_KEY: &str =
    "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

pub struct Scenario {
    pub container: Arc<ServiceContainer>,
    pub wallet: Secp256k1KeyPair,
    pub encryption_key: EncryptionSecretKey,
}

impl Scenario {
    pub fn new() -> Self {
        let mut config = RuntimeConfig::default();
        config.backend.private_key = Some(BACKEND_KEY.to_string());
        config.merkle.tree_depth = 8;
        config
            .validate_for_production()
            .expect("fixture config is production-ready");

        Self {
            container: Arc::new(ServiceContainer::new(config).expect("container")),
            wallet: Secp256k1KeyPair::generate(),
            encryption_key: EncryptionSecretKey::generate(),
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.container.config.chain.chain_id
    }

    pub fn add_account(
        &self,
        provider: Web2Provider,
        provider_account_id: &str,
        reputation: Option<BasicReputation>,
    ) -> Web2Account {
        let account = Web2Account::new(provider, provider_account_id, reputation);
        self.container.accounts.insert(account.clone());
        account
    }

    /// Link request signed by this scenario's wallet.
    pub fn link_request(&self, account: &Web2Account) -> LinkRequest {
        let web2_account_id = account.id.to_string();
        let message =
            link_authorization_message(self.chain_id(), self.wallet.address(), &web2_account_id);

        LinkRequest {
            chain_id: self.chain_id(),
            address: self.wallet.address().to_checksum(),
            web2_account_id,
            user_signature: sign_message(&self.wallet, &message).unwrap().to_hex(),
            user_public_key: self.encryption_key.public_key().to_hex(),
        }
    }

    /// Decrypt the token's attestation as the user's wallet would.
    pub fn decrypt(&self, token: &Token) -> String {
        decrypt_message_with_salt(&self.encryption_key, &token.encrypted_attestation).unwrap()
    }

    pub async fn stored_account(&self, account: &Web2Account) -> Web2Account {
        self.container
            .accounts
            .find_by_id(&account.id.to_string())
            .await
            .unwrap()
            .unwrap()
    }
}
