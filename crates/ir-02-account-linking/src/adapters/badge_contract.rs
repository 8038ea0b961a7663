//! Badge Contract Adapter
//!
//! Simulated reputation badge contract implementing `BadgeMinter`, plus a
//! status refresher that mirrors its burns into the token store.
//!
//! In production these would talk to the deployed ERC-721 badge over RPC.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared_crypto::keccak256;
use shared_types::{Address, ChainId};
use tracing::{debug, info};

use crate::domain::entities::{MintReceipt, Token, TokenStatus};
use crate::domain::errors::OnchainError;
use crate::ports::outbound::{BadgeMinter, TokenStatusRefresher, TokenStore};

/// On-chain state of one badge id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BadgeState {
    owner: Address,
    burned: bool,
}

/// In-memory badge contract for testing and local runs.
pub struct InMemoryBadgeContract {
    chain_id: ChainId,
    badges: RwLock<HashMap<String, BadgeState>>,
    block_number: RwLock<u64>,
    fail_next_mint: Mutex<Option<OnchainError>>,
}

impl InMemoryBadgeContract {
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            badges: RwLock::new(HashMap::new()),
            block_number: RwLock::new(0),
            fail_next_mint: Mutex::new(None),
        }
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Current owner of a live badge.
    pub fn owner_of(&self, decimal_id: &str) -> Option<Address> {
        self.badges
            .read()
            .get(decimal_id)
            .filter(|badge| !badge.burned)
            .map(|badge| badge.owner)
    }

    /// Burn a badge, as its holder would on-chain.
    pub fn burn(&self, decimal_id: &str) -> Result<(), OnchainError> {
        let mut badges = self.badges.write();
        let badge = badges
            .get_mut(decimal_id)
            .filter(|badge| !badge.burned)
            .ok_or_else(|| OnchainError::Reverted(format!("nonexistent token {decimal_id}")))?;

        badge.burned = true;
        *self.block_number.write() += 1;
        info!(%decimal_id, "badge burned");
        Ok(())
    }

    /// Whether the badge has been burned. `None` if it was never minted.
    pub fn is_burned(&self, decimal_id: &str) -> Option<bool> {
        self.badges.read().get(decimal_id).map(|badge| badge.burned)
    }

    /// Make the next mint fail with `error`.
    pub fn fail_next_mint(&self, error: OnchainError) {
        *self.fail_next_mint.lock() = Some(error);
    }
}

#[async_trait]
impl BadgeMinter for InMemoryBadgeContract {
    async fn mint(&self, address: Address, decimal_id: &str) -> Result<MintReceipt, OnchainError> {
        if let Some(error) = self.fail_next_mint.lock().take() {
            return Err(error);
        }

        let mut badges = self.badges.write();
        if badges.get(decimal_id).is_some_and(|badge| !badge.burned) {
            return Err(OnchainError::Reverted(format!(
                "token {decimal_id} already minted"
            )));
        }
        badges.insert(
            decimal_id.to_string(),
            BadgeState {
                owner: address,
                burned: false,
            },
        );

        let block_number = {
            let mut block = self.block_number.write();
            *block += 1;
            *block
        };
        let tx_hash = keccak256(format!("{decimal_id}:{address}:{block_number}").as_bytes());
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        info!(%address, %decimal_id, block_number, "badge minted");

        Ok(MintReceipt {
            tx_hash: format!("0x{}", hex::encode(tx_hash)),
            block_number,
            chain_id: self.chain_id,
            timestamp,
        })
    }
}

/// Mirrors on-chain burns into stored tokens.
pub struct ChainTokenStatusRefresher {
    contract: Arc<InMemoryBadgeContract>,
    tokens: Arc<dyn TokenStore>,
}

impl ChainTokenStatusRefresher {
    pub fn new(contract: Arc<InMemoryBadgeContract>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { contract, tokens }
    }
}

#[async_trait]
impl TokenStatusRefresher for ChainTokenStatusRefresher {
    async fn refresh_status(&self, tokens: &mut [Token]) -> Result<(), OnchainError> {
        for token in tokens.iter_mut() {
            let burned = self.contract.is_burned(&token.decimal_id).ok_or_else(|| {
                OnchainError::Reverted(format!("nonexistent token {}", token.decimal_id))
            })?;

            if burned && token.status == TokenStatus::Minted {
                token
                    .transition_to(TokenStatus::Burned)
                    .map_err(|e| OnchainError::Unavailable(e.to_string()))?;
                self.tokens
                    .save(token)
                    .await
                    .map_err(|e| OnchainError::Unavailable(format!("status not persisted: {e}")))?;
                debug!(decimal_id = %token.decimal_id, "token status refreshed to BURNED");
            }
        }
        Ok(())
    }
}
