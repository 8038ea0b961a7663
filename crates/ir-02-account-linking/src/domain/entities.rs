//! # Domain Entities
//!
//! ## Clusters
//!
//! - **Accounts**: [`Web2Account`]
//! - **Badges**: [`Token`], [`TokenStatus`], [`MintReceipt`]
//! - **Requests**: [`LinkRequest`]

use serde::{Deserialize, Serialize};
use shared_crypto::keccak256;
use shared_types::{Address, BasicReputation, ChainId, Web2Provider, U256};
use uuid::Uuid;

use super::errors::TransitionError;

// =============================================================================
// ACCOUNTS
// =============================================================================

/// A reputation-bearing social account, maintained by onboarding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Web2Account {
    pub id: Uuid,
    pub provider: Web2Provider,
    pub provider_account_id: String,
    pub is_linked_to_address: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_reputation: Option<BasicReputation>,
}

impl Web2Account {
    /// Fresh, unlinked account with a random id.
    pub fn new(
        provider: Web2Provider,
        provider_account_id: impl Into<String>,
        basic_reputation: Option<BasicReputation>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider,
            provider_account_id: provider_account_id.into(),
            is_linked_to_address: false,
            basic_reputation,
        }
    }

    /// Badge token id for this account.
    pub fn decimal_id(&self) -> String {
        decimal_id(self.provider, &self.provider_account_id)
    }
}

/// Canonical badge token id of a web2 identity.
///
/// `U256(keccak256("<provider>:<providerAccountId>"))` rendered in decimal.
/// Linking and unlinking both recompute it; it must never change.
pub fn decimal_id(provider: Web2Provider, provider_account_id: &str) -> String {
    let preimage = format!("{}:{}", provider.as_str(), provider_account_id);
    U256::from_big_endian(&keccak256(preimage.as_bytes())).to_string()
}

// =============================================================================
// BADGES
// =============================================================================

/// Lifecycle of a badge token. Only moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenStatus {
    Minted,
    Burned,
    Revoked,
}

impl TokenStatus {
    /// `MINTED -> BURNED -> REVOKED`, nothing else.
    pub fn can_transition_to(self, next: TokenStatus) -> bool {
        matches!(
            (self, next),
            (TokenStatus::Minted, TokenStatus::Burned) | (TokenStatus::Burned, TokenStatus::Revoked)
        )
    }
}

/// Receipt of the mint transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintReceipt {
    pub tx_hash: String,
    pub block_number: u64,
    pub chain_id: ChainId,
    pub timestamp: u64,
}

/// Persisted mirror of an on-chain badge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: Uuid,
    pub user_address: Address,
    pub decimal_id: String,
    pub status: TokenStatus,
    pub encrypted_attestation: String,
    pub mint_receipt: MintReceipt,
}

impl Token {
    /// New `MINTED` token.
    pub fn minted(
        user_address: Address,
        decimal_id: String,
        encrypted_attestation: String,
        mint_receipt: MintReceipt,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_address,
            decimal_id,
            status: TokenStatus::Minted,
            encrypted_attestation,
            mint_receipt,
        }
    }

    /// Move to `next`, rejecting anything but a single forward step.
    pub fn transition_to(&mut self, next: TokenStatus) -> Result<(), TransitionError> {
        if !self.status.can_transition_to(next) {
            return Err(TransitionError {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Message the user signs with their wallet to authorize a link.
pub fn link_authorization_message(
    chain_id: ChainId,
    address: Address,
    web2_account_id: &str,
) -> String {
    format!(
        "InterRep: link web2 account {web2_account_id} to {} on chain {chain_id}",
        address.to_checksum()
    )
}

/// Input of [`link_accounts`](crate::AccountLinkingApi::link_accounts).
///
/// Fields arrive unvalidated from the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    pub chain_id: ChainId,
    pub address: String,
    pub web2_account_id: String,
    pub user_signature: String,
    pub user_public_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_id_is_keccak_of_provider_and_id() {
        assert_eq!(
            decimal_id(Web2Provider::Twitter, "999"),
            "88305971221107497759712075503445102070235629169713912063867658703914506488255"
        );
        assert_eq!(
            decimal_id(Web2Provider::Github, "999"),
            "918251432663285962414750258617818475598280442297853813616593971743407771465"
        );
    }

    #[test]
    fn test_decimal_id_is_deterministic() {
        let account = Web2Account::new(Web2Provider::Twitter, "1", None);
        assert_eq!(account.decimal_id(), account.decimal_id());
        assert_eq!(
            account.decimal_id(),
            "26416248808045501609839006017699279213909019965914492617043095270829299868252"
        );
    }

    fn token() -> Token {
        Token::minted(
            Address::ZERO,
            "1".to_string(),
            "{}".to_string(),
            MintReceipt {
                tx_hash: "0x01".to_string(),
                block_number: 1,
                chain_id: 31337,
                timestamp: 0,
            },
        )
    }

    #[test]
    fn test_forward_transitions() {
        let mut token = token();
        assert_eq!(token.status, TokenStatus::Minted);

        token.transition_to(TokenStatus::Burned).unwrap();
        token.transition_to(TokenStatus::Revoked).unwrap();

        assert_eq!(token.status, TokenStatus::Revoked);
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut token = token();
        assert_eq!(
            token.transition_to(TokenStatus::Revoked),
            Err(TransitionError {
                from: TokenStatus::Minted,
                to: TokenStatus::Revoked
            })
        );
        assert!(token.transition_to(TokenStatus::Minted).is_err());

        token.transition_to(TokenStatus::Burned).unwrap();
        assert!(token.transition_to(TokenStatus::Minted).is_err());
        assert!(token.transition_to(TokenStatus::Burned).is_err());

        token.transition_to(TokenStatus::Revoked).unwrap();
        for next in [TokenStatus::Minted, TokenStatus::Burned, TokenStatus::Revoked] {
            assert!(token.transition_to(next).is_err());
        }
        assert_eq!(token.status, TokenStatus::Revoked);
    }

    #[test]
    fn test_authorization_message_binds_chain_and_address() {
        let address: Address = "0x622c62E3be972ABdF172DA466d425Df4C93470E4".parse().unwrap();
        let message = link_authorization_message(31337, address, "abc");

        assert_eq!(
            message,
            "InterRep: link web2 account abc to 0x622c62E3be972ABdF172DA466d425Df4C93470E4 on chain 31337"
        );
        assert_ne!(message, link_authorization_message(1, address, "abc"));
    }

    #[test]
    fn test_token_serializes_camel_case() {
        let json = serde_json::to_value(token()).unwrap();
        assert_eq!(json["status"], "MINTED");
        assert_eq!(json["decimalId"], "1");
        assert_eq!(json["mintReceipt"]["blockNumber"], 1);
        assert_eq!(
            json["userAddress"],
            "0x0000000000000000000000000000000000000000"
        );
    }
}
