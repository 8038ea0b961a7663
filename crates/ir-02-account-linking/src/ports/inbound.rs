//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::{LinkRequest, Token};
use crate::domain::errors::LinkError;
use crate::domain::outcome::UnlinkOutcome;
use async_trait::async_trait;

/// Account linking API.
///
/// Calls for the same web2 account must not overlap; callers serialize them.
#[async_trait]
pub trait AccountLinkingApi: Send + Sync {
    /// Link a confirmed web2 account to an address, minting its badge.
    ///
    /// The account is only flagged linked after the token is persisted.
    async fn link_accounts(&self, request: LinkRequest) -> Result<Token, LinkError>;

    /// Revoke a burned badge and release the account.
    ///
    /// `decrypted_attestation` is the `{"salt","message"}` document the user
    /// decrypted from the token's encrypted attestation.
    async fn unlink_accounts(
        &self,
        web2_account_id: &str,
        decrypted_attestation: &str,
    ) -> UnlinkOutcome;
}
