//! # Account Linking Service
//!
//! Application service implementing `AccountLinkingApi`.
//!
//! Each flow is a chain of short-circuiting gates; later gates rely on the
//! earlier ones having passed. See `link.rs` and `unlink.rs`.

mod link;
mod unlink;

use std::sync::Arc;

use async_trait::async_trait;
use ir_01_attestation::AttestationApi;

use crate::domain::entities::{LinkRequest, Token};
use crate::domain::errors::LinkError;
use crate::domain::outcome::UnlinkOutcome;
use crate::ports::inbound::AccountLinkingApi;
use crate::ports::outbound::{
    AttestationEncryptor, BadgeMinter, TokenStatusRefresher, TokenStore, UserSignatureVerifier,
    Web2AccountStore,
};

/// Collaborators of the linking service.
#[derive(Clone)]
pub struct LinkingDependencies {
    pub accounts: Arc<dyn Web2AccountStore>,
    pub tokens: Arc<dyn TokenStore>,
    pub signatures: Arc<dyn UserSignatureVerifier>,
    pub minter: Arc<dyn BadgeMinter>,
    pub refresher: Arc<dyn TokenStatusRefresher>,
    pub encryptor: Arc<dyn AttestationEncryptor>,
    pub attestation: Arc<dyn AttestationApi>,
}

/// Account Linking Service.
pub struct AccountLinkingService {
    deps: LinkingDependencies,
}

impl AccountLinkingService {
    pub fn new(deps: LinkingDependencies) -> Self {
        Self { deps }
    }
}

#[async_trait]
impl AccountLinkingApi for AccountLinkingService {
    async fn link_accounts(&self, request: LinkRequest) -> Result<Token, LinkError> {
        link::link_accounts(&self.deps, request).await
    }

    async fn unlink_accounts(
        &self,
        web2_account_id: &str,
        decrypted_attestation: &str,
    ) -> UnlinkOutcome {
        unlink::unlink_accounts(&self.deps, web2_account_id, decrypted_attestation)
            .await
            .into()
    }
}
