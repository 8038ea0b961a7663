//! # Service Container
//!
//! Holds the subsystem services and the adapters they are wired to.
//!
//! ## Initialization Order
//!
//! ```text
//! IR-01: Attestation (backend key, trusted address)
//! IR-02: Account Linking (stores, badge contract, IR-01)
//! IR-03: Merkle Paths (tree store)
//! ```
//!
//! ## Thread Safety
//!
//! - Services and adapters are shared through `Arc`
//! - Link and unlink of one web2 account are serialized by `AccountLocks`

use std::sync::Arc;

use shared_crypto::Secp256k1KeyPair;
use tracing::{info, instrument, warn};

use ir_01_attestation::AttestationService;
use ir_02_account_linking::{
    AccountLinkingApi, AccountLinkingService, ChainTokenStatusRefresher,
    Eip191UserSignatureVerifier, InMemoryBadgeContract, InMemoryTokenStore,
    InMemoryWeb2AccountStore, LinkOutcome, LinkRequest, LinkingDependencies, SealedBoxEncryptor,
    UnlinkOutcome,
};
use ir_03_merkle_paths::{
    InMemoryTreeStore, KeccakNodeHasher, MerklePath, MerklePathApi, MerklePathService, PathError,
};
use shared_types::U256;

use crate::container::config::{ConfigError, RuntimeConfig};
use crate::container::locks::AccountLocks;

/// Central container holding all subsystem instances.
pub struct ServiceContainer {
    // =========================================================================
    // IR-01: Attestation
    // =========================================================================
    /// Backend attestation signer and verifier.
    pub attestation: Arc<AttestationService>,

    // =========================================================================
    // IR-02: Account Linking
    // =========================================================================
    pub accounts: Arc<InMemoryWeb2AccountStore>,
    pub tokens: Arc<InMemoryTokenStore>,
    /// Simulated badge contract standing in for the deployed ERC-721.
    pub badge_contract: Arc<InMemoryBadgeContract>,
    pub linking: Arc<AccountLinkingService>,

    // =========================================================================
    // IR-03: Merkle Paths
    // =========================================================================
    pub trees: Arc<InMemoryTreeStore>,
    pub merkle_paths: Arc<MerklePathService>,

    // =========================================================================
    // SHARED INFRASTRUCTURE
    // =========================================================================
    pub account_locks: AccountLocks,

    /// Runtime configuration (immutable after initialization).
    pub config: RuntimeConfig,
}

impl ServiceContainer {
    /// Create a container with every subsystem initialized.
    #[instrument(name = "container_init", skip(config))]
    pub fn new(config: RuntimeConfig) -> Result<Self, ConfigError> {
        info!("Initializing InterRep service container");

        // IR-01
        let keypair = match config.backend.keypair()? {
            Some(keypair) => keypair,
            None => {
                warn!("No backend key configured, generating an ephemeral one");
                Secp256k1KeyPair::generate()
            }
        };
        let signer = keypair.address();
        let trusted = config.backend.trusted_address.unwrap_or(signer);
        if trusted != signer {
            warn!(%signer, %trusted, "backend key does not match trusted address");
        }
        let attestation = Arc::new(AttestationService::new(keypair, trusted));
        info!(%signer, %trusted, "  [01] Attestation initialized");

        // IR-02
        let accounts = Arc::new(InMemoryWeb2AccountStore::new());
        let tokens = Arc::new(InMemoryTokenStore::new());
        let badge_contract = Arc::new(InMemoryBadgeContract::new(config.chain.chain_id));
        let linking = Arc::new(AccountLinkingService::new(LinkingDependencies {
            accounts: accounts.clone(),
            tokens: tokens.clone(),
            signatures: Arc::new(Eip191UserSignatureVerifier::new()),
            minter: badge_contract.clone(),
            refresher: Arc::new(ChainTokenStatusRefresher::new(
                badge_contract.clone(),
                tokens.clone(),
            )),
            encryptor: Arc::new(SealedBoxEncryptor::new()),
            attestation: attestation.clone(),
        }));
        info!(chain_id = config.chain.chain_id, "  [02] Account Linking initialized");

        // IR-03
        let trees = Arc::new(
            InMemoryTreeStore::new(config.merkle.tree_depth, Arc::new(KeccakNodeHasher))
                .map_err(|_| ConfigError::InvalidTreeDepth(config.merkle.tree_depth))?,
        );
        let merkle_paths = Arc::new(MerklePathService::new(trees.clone()));
        info!(depth = config.merkle.tree_depth, "  [03] Merkle Paths initialized");

        Ok(Self {
            attestation,
            accounts,
            tokens,
            badge_contract,
            linking,
            trees,
            merkle_paths,
            account_locks: AccountLocks::new(),
            config,
        })
    }

    /// Link under the account's lock.
    pub async fn link_accounts(&self, request: LinkRequest) -> LinkOutcome {
        let _guard = self.account_locks.acquire(&request.web2_account_id).await;
        self.linking.link_accounts(request).await.into()
    }

    /// Unlink under the account's lock.
    pub async fn unlink_accounts(
        &self,
        web2_account_id: &str,
        decrypted_attestation: &str,
    ) -> UnlinkOutcome {
        let _guard = self.account_locks.acquire(web2_account_id).await;
        self.linking
            .unlink_accounts(web2_account_id, decrypted_attestation)
            .await
    }

    pub fn retrieve_path(
        &self,
        provider: &str,
        group_name: &str,
        id_commitment: U256,
    ) -> Result<MerklePath, PathError> {
        self.merkle_paths
            .retrieve_path(provider, group_name, id_commitment)
    }
}
