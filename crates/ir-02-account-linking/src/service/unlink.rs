//! Unlinking gate chain.
//!
//! Every failure becomes an `UnlinkError`; nothing here panics or aborts.
//! Attestation fields are only trusted after the signature gate passes.

use ir_01_attestation::parse_decrypted_attestation;
use tracing::{error, info, warn};

use super::LinkingDependencies;
use crate::domain::entities::TokenStatus;
use crate::domain::errors::UnlinkError;

pub(super) async fn unlink_accounts(
    deps: &LinkingDependencies,
    web2_account_id: &str,
    decrypted_attestation: &str,
) -> Result<(), UnlinkError> {
    // 1. Account
    let mut account = match deps.accounts.find_by_id(web2_account_id).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            warn!(%web2_account_id, "unlink rejected: account not found");
            return Err(UnlinkError::AccountNotFound);
        }
        Err(e) => {
            warn!(%web2_account_id, error = %e, "unlink rejected: account lookup failed");
            return Err(UnlinkError::AccountNotFound);
        }
    };

    // 2. Linked
    if !account.is_linked_to_address {
        warn!(%web2_account_id, "unlink rejected: account not linked");
        return Err(UnlinkError::NotLinked);
    }

    // 3. Payload
    let signed = parse_decrypted_attestation(decrypted_attestation).map_err(|e| {
        warn!(%web2_account_id, error = %e, "unlink rejected: malformed attestation");
        UnlinkError::InvalidAttestation
    })?;

    // 4. Backend signature
    deps.attestation
        .verify(
            &signed.attestation_message,
            &signed.backend_attestation_signature,
        )
        .map_err(|e| {
            warn!(%web2_account_id, error = %e, "unlink rejected: attestation signature");
            UnlinkError::SignatureInvalid
        })?;

    // 5. Same web2 account
    let message = deps
        .attestation
        .decode(&signed.attestation_message)
        .map_err(|e| {
            warn!(%web2_account_id, error = %e, "unlink rejected: undecodable attestation");
            UnlinkError::InvalidAttestation
        })?;
    if message.provider_account_id != account.provider_account_id {
        warn!(
            %web2_account_id,
            attested = %message.provider_account_id,
            "unlink rejected: web2 account mismatch"
        );
        return Err(UnlinkError::AccountMismatch);
    }

    // 6. Token
    let mut token = deps
        .tokens
        .find_by_decimal_id(&message.decimal_id)
        .await
        .map_err(|e| {
            error!(decimal_id = %message.decimal_id, error = %e, "token lookup failed");
            UnlinkError::internal(e)
        })?
        .ok_or_else(|| {
            warn!(decimal_id = %message.decimal_id, "unlink rejected: token not found");
            UnlinkError::TokenNotFound {
                decimal_id: message.decimal_id.clone(),
            }
        })?;

    // 7. Sync with chain
    deps.refresher
        .refresh_status(std::slice::from_mut(&mut token))
        .await
        .map_err(|e| {
            error!(decimal_id = %token.decimal_id, error = %e, "status refresh failed");
            UnlinkError::internal(e)
        })?;

    // 8. Burned, or already revoked by an unlink that never cleared the account
    match token.status {
        TokenStatus::Burned => {
            // 9. Revoke, then release the account
            token
                .transition_to(TokenStatus::Revoked)
                .map_err(UnlinkError::internal)?;
            deps.tokens.save(&token).await.map_err(|e| {
                error!(decimal_id = %token.decimal_id, error = %e, "revoked token not persisted");
                UnlinkError::internal(e)
            })?;
        }
        TokenStatus::Revoked => {
            info!(
                %web2_account_id,
                decimal_id = %token.decimal_id,
                "token already revoked, finishing account release"
            );
        }
        TokenStatus::Minted => {
            warn!(
                decimal_id = %token.decimal_id,
                status = ?token.status,
                "unlink rejected: token not burned"
            );
            return Err(UnlinkError::NotBurned);
        }
    }

    account.is_linked_to_address = false;
    deps.accounts.save(&account).await.map_err(|e| {
        error!(
            %web2_account_id,
            decimal_id = %token.decimal_id,
            error = %e,
            "token revoked but account still flagged linked"
        );
        UnlinkError::internal(e)
    })?;

    info!(%web2_account_id, decimal_id = %token.decimal_id, "accounts unlinked");

    Ok(())
}
