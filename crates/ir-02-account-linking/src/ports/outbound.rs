//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits that define dependencies this subsystem needs.

use crate::domain::entities::{MintReceipt, Token, Web2Account};
use async_trait::async_trait;
use shared_crypto::CryptoError;
use shared_types::{Address, ChainId};
use uuid::Uuid;

pub use crate::domain::errors::{OnchainError, StoreError};

/// Web2 account persistence.
#[async_trait]
pub trait Web2AccountStore: Send + Sync {
    /// Look up an account by its id as received from the caller.
    ///
    /// # Errors
    /// * `StoreError::MalformedId` - `id` cannot be an account id
    async fn find_by_id(&self, id: &str) -> Result<Option<Web2Account>, StoreError>;

    /// Persist changes to an existing account.
    async fn save(&self, account: &Web2Account) -> Result<(), StoreError>;
}

/// Badge token persistence.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Token>, StoreError>;

    /// Most recently created token for a decimal id.
    async fn find_by_decimal_id(&self, decimal_id: &str) -> Result<Option<Token>, StoreError>;

    /// Insert a new token.
    ///
    /// # Errors
    /// * `StoreError::Duplicate` - a token with the same id exists
    async fn create(&self, token: Token) -> Result<Token, StoreError>;

    /// Persist changes to an existing token.
    async fn save(&self, token: &Token) -> Result<(), StoreError>;
}

/// Checks that the user authorized a link with their wallet.
#[async_trait]
pub trait UserSignatureVerifier: Send + Sync {
    async fn verify_signature(
        &self,
        address: Address,
        message: &str,
        signature: &str,
        chain_id: ChainId,
    ) -> bool;
}

/// Badge contract minting.
#[async_trait]
pub trait BadgeMinter: Send + Sync {
    /// Mint badge `decimal_id` to `address`, waiting for the receipt.
    async fn mint(&self, address: Address, decimal_id: &str) -> Result<MintReceipt, OnchainError>;
}

/// Syncs token status with the chain.
#[async_trait]
pub trait TokenStatusRefresher: Send + Sync {
    /// Update each token's status from the chain in place and persist changes.
    async fn refresh_status(&self, tokens: &mut [Token]) -> Result<(), OnchainError>;
}

/// Encrypts the signed attestation to the user's key.
pub trait AttestationEncryptor: Send + Sync {
    /// # Errors
    /// Fails on a malformed `public_key`.
    fn encrypt(&self, public_key: &str, plaintext: &str) -> Result<String, CryptoError>;
}
