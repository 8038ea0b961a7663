//! Linking gate chain.
//!
//! The account is flagged linked only after its token has been persisted.
//! Nothing is rolled back on-chain when persistence fails after the mint;
//! the orphaned badge is reported at `error` level with its receipt.

use ir_01_attestation::{AttestationFields, SignedAttestation};
use shared_types::{Address, BasicReputation};
use tracing::{debug, error, info, warn};

use super::LinkingDependencies;
use crate::domain::entities::{decimal_id, link_authorization_message, LinkRequest, Token};
use crate::domain::errors::LinkError;

pub(super) async fn link_accounts(
    deps: &LinkingDependencies,
    request: LinkRequest,
) -> Result<Token, LinkError> {
    let LinkRequest {
        chain_id,
        address,
        web2_account_id,
        user_signature,
        user_public_key,
    } = request;

    // 1. Address
    let address: Address = address.parse().map_err(|_| {
        warn!(%address, "link rejected: invalid address");
        LinkError::InvalidAddress(address.clone())
    })?;

    // 2. User authorization
    let message = link_authorization_message(chain_id, address, &web2_account_id);
    if !deps
        .signatures
        .verify_signature(address, &message, &user_signature, chain_id)
        .await
    {
        warn!(%address, chain_id, "link rejected: invalid user signature");
        return Err(LinkError::InvalidSignature);
    }

    // 3. Account
    let mut account = deps
        .accounts
        .find_by_id(&web2_account_id)
        .await
        .map_err(|e| {
            warn!(%web2_account_id, error = %e, "link rejected: account lookup failed");
            LinkError::AccountLookupError(e)
        })?
        .ok_or_else(|| {
            warn!(%web2_account_id, "link rejected: account not found");
            LinkError::AccountNotFound
        })?;

    // 4. Not yet linked
    if account.is_linked_to_address {
        warn!(%web2_account_id, "link rejected: already linked");
        return Err(LinkError::AlreadyLinked);
    }

    // 5. Reputation
    if account.basic_reputation != Some(BasicReputation::Confirmed) {
        warn!(
            %web2_account_id,
            reputation = ?account.basic_reputation,
            "link rejected: insufficient reputation"
        );
        return Err(LinkError::InsufficientReputation);
    }

    // 6. Token id
    let decimal_id = decimal_id(account.provider, &account.provider_account_id);

    // 7. Attestation
    let attestation_message = deps.attestation.canonicalize(&AttestationFields {
        provider_account_id: account.provider_account_id.clone(),
        provider: account.provider,
        address,
        decimal_id: decimal_id.clone(),
    })?;
    let backend_attestation_signature = deps.attestation.sign(&attestation_message)?;
    let signed = SignedAttestation {
        attestation_message,
        backend_attestation_signature,
    };

    // 8. Encrypt to the user
    let encrypted_attestation = deps
        .encryptor
        .encrypt(&user_public_key, &signed.to_json()?)
        .map_err(|e| {
            warn!(%web2_account_id, error = %e, "link rejected: attestation encryption failed");
            LinkError::EncryptionError(e)
        })?;
    debug!(%web2_account_id, %decimal_id, "attestation created");

    // 9. Mint
    let receipt = deps.minter.mint(address, &decimal_id).await.map_err(|e| {
        warn!(%address, %decimal_id, error = %e, "mint failed");
        e
    })?;

    // 10. Token
    let token = Token::minted(address, decimal_id, encrypted_attestation, receipt);
    let token = deps.tokens.create(token.clone()).await.map_err(|e| {
        error!(
            %address,
            decimal_id = %token.decimal_id,
            tx_hash = %token.mint_receipt.tx_hash,
            block_number = token.mint_receipt.block_number,
            error = %e,
            "badge minted but token not persisted"
        );
        LinkError::Storage(e)
    })?;

    // 11. Account flag
    account.is_linked_to_address = true;
    deps.accounts.save(&account).await.map_err(|e| {
        error!(
            %web2_account_id,
            decimal_id = %token.decimal_id,
            tx_hash = %token.mint_receipt.tx_hash,
            error = %e,
            "token persisted but account not flagged linked"
        );
        LinkError::Storage(e)
    })?;

    info!(
        %web2_account_id,
        %address,
        decimal_id = %token.decimal_id,
        "accounts linked"
    );

    Ok(token)
}
