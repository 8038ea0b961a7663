//! # Integration Test Flows
//!
//! Link and unlink driven through the runtime container, with the badge
//! contract burned in between the way a holder would on-chain.
//!
//! ## Flows Tested:
//!
//! 1. **Link (02 → 01)**: user signature, mint, backend attestation, encryption
//! 2. **Unlink (02 → 01)**: decrypted attestation verified against the trusted backend
//! 3. **Serialization**: concurrent requests for one account go through `AccountLocks`

use std::sync::Arc;

use ir_01_attestation::{
    canonicalize, decode, parse_decrypted_attestation, sign_message, AttestationApi,
    AttestationFields, SignedAttestation,
};
use ir_02_account_linking::{
    LinkError, LinkOutcome, TokenStatus, TokenStore, UnlinkError, UnlinkOutcome,
};
use shared_crypto::{SaltedMessage, Secp256k1KeyPair};
use shared_types::{BasicReputation, Web2Provider};

use super::fixtures::Scenario;

const TWITTER_999_DECIMAL_ID: &str =
    "88305971221107497759712075503445102070235629169713912063867658703914506488255";

fn linked(outcome: LinkOutcome) -> ir_02_account_linking::Token {
    match outcome {
        LinkOutcome::Linked(token) => token,
        LinkOutcome::Failed(e) => panic!("link failed: {e}"),
    }
}

// =============================================================================
// LINK
// =============================================================================

#[tokio::test]
async fn test_twitter_999_link_issues_badge_and_attestation() {
    let scenario = Scenario::new();
    let account = scenario.add_account(
        Web2Provider::Twitter,
        "999",
        Some(BasicReputation::Confirmed),
    );

    let token = linked(
        scenario
            .container
            .link_accounts(scenario.link_request(&account))
            .await,
    );

    assert_eq!(token.decimal_id, TWITTER_999_DECIMAL_ID);
    assert_eq!(token.status, TokenStatus::Minted);
    assert_eq!(token.user_address, scenario.wallet.address());
    assert_eq!(token.mint_receipt.chain_id, scenario.chain_id());
    assert_eq!(
        scenario.container.badge_contract.owner_of(TWITTER_999_DECIMAL_ID),
        Some(scenario.wallet.address())
    );
    assert!(scenario.stored_account(&account).await.is_linked_to_address);

    // The user can decrypt the attestation and the backend signature holds.
    let signed = parse_decrypted_attestation(&scenario.decrypt(&token)).unwrap();
    scenario
        .container
        .attestation
        .verify(&signed.attestation_message, &signed.backend_attestation_signature)
        .unwrap();

    let message = decode(&signed.attestation_message).unwrap();
    assert_eq!(message.service, "InterRep");
    assert_eq!(message.decimal_id, TWITTER_999_DECIMAL_ID);
    assert_eq!(message.user_address, scenario.wallet.address());
    assert_eq!(message.web2_provider, Web2Provider::Twitter);
    assert_eq!(message.provider_account_id, "999");
}

#[tokio::test]
async fn test_link_outcome_serializes_for_the_boundary() {
    let scenario = Scenario::new();
    let account = scenario.add_account(Web2Provider::Github, "42", Some(BasicReputation::Confirmed));

    let outcome = scenario
        .container
        .link_accounts(scenario.link_request(&account))
        .await;
    let json: serde_json::Value = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["token"]["decimalId"], account.decimal_id());
    assert_eq!(json["token"]["status"], "MINTED");

    // Second attempt fails with the account's message.
    let again = scenario
        .container
        .link_accounts(scenario.link_request(&account))
        .await;
    let json: serde_json::Value = serde_json::to_value(&again).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Web 2 account already linked");
}

#[tokio::test]
async fn test_insufficient_reputation_mints_nothing() {
    let scenario = Scenario::new();
    let account = scenario.add_account(
        Web2Provider::Reddit,
        "lurker",
        Some(BasicReputation::NotSufficient),
    );

    let outcome = scenario
        .container
        .link_accounts(scenario.link_request(&account))
        .await;

    assert!(matches!(
        outcome,
        LinkOutcome::Failed(LinkError::InsufficientReputation)
    ));
    assert!(scenario.container.tokens.is_empty());
    assert_eq!(
        scenario.container.badge_contract.owner_of(&account.decimal_id()),
        None
    );
}

#[tokio::test]
async fn test_concurrent_links_of_one_account_mint_once() {
    let scenario = Arc::new(Scenario::new());
    let account = scenario.add_account(
        Web2Provider::Twitter,
        "race",
        Some(BasicReputation::Confirmed),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let scenario = scenario.clone();
            let request = scenario.link_request(&account);
            tokio::spawn(async move { scenario.container.link_accounts(request).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            LinkOutcome::Linked(_) => successes += 1,
            LinkOutcome::Failed(e) => assert!(matches!(e, LinkError::AlreadyLinked), "{e:?}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(scenario.container.tokens.len(), 1);
}

// =============================================================================
// UNLINK
// =============================================================================

#[tokio::test]
async fn test_unlink_after_burn_succeeds_and_allows_relink() {
    let scenario = Scenario::new();
    let account = scenario.add_account(
        Web2Provider::Twitter,
        "999",
        Some(BasicReputation::Confirmed),
    );
    let token = linked(
        scenario
            .container
            .link_accounts(scenario.link_request(&account))
            .await,
    );
    let decrypted = scenario.decrypt(&token);

    scenario
        .container
        .badge_contract
        .burn(&token.decimal_id)
        .unwrap();
    let outcome = scenario
        .container
        .unlink_accounts(&account.id.to_string(), &decrypted)
        .await;

    assert_eq!(outcome, UnlinkOutcome::Unlinked);
    assert_eq!(
        serde_json::to_string(&outcome).unwrap(),
        r#"{"success":true,"message":"Accounts were successfully un-linked"}"#
    );
    assert!(!scenario.stored_account(&account).await.is_linked_to_address);
    let stored = scenario
        .container
        .tokens
        .find_by_id(token.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, TokenStatus::Revoked);

    // Same identity, same badge id, minted again.
    let relinked = linked(
        scenario
            .container
            .link_accounts(scenario.link_request(&account))
            .await,
    );
    assert_eq!(relinked.decimal_id, token.decimal_id);
    assert_ne!(relinked.id, token.id);
}

#[tokio::test]
async fn test_unlink_before_burn_is_rejected() {
    let scenario = Scenario::new();
    let account = scenario.add_account(
        Web2Provider::Github,
        "holder",
        Some(BasicReputation::Confirmed),
    );
    let token = linked(
        scenario
            .container
            .link_accounts(scenario.link_request(&account))
            .await,
    );

    let outcome = scenario
        .container
        .unlink_accounts(&account.id.to_string(), &scenario.decrypt(&token))
        .await;

    assert_eq!(outcome, UnlinkOutcome::Rejected(UnlinkError::NotBurned));
    assert!(scenario.stored_account(&account).await.is_linked_to_address);
    assert_eq!(
        scenario.container.badge_contract.owner_of(&token.decimal_id),
        Some(scenario.wallet.address())
    );
}

#[tokio::test]
async fn test_unlink_with_non_backend_signer_is_rejected() {
    let scenario = Scenario::new();
    let account = scenario.add_account(
        Web2Provider::Twitter,
        "999",
        Some(BasicReputation::Confirmed),
    );
    let token = linked(
        scenario
            .container
            .link_accounts(scenario.link_request(&account))
            .await,
    );
    scenario
        .container
        .badge_contract
        .burn(&token.decimal_id)
        .unwrap();

    // Well-formed attestation for the right account, signed by someone else.
    let impostor = Secp256k1KeyPair::generate();
    let message = canonicalize(&AttestationFields {
        provider_account_id: "999".to_string(),
        provider: Web2Provider::Twitter,
        address: scenario.wallet.address(),
        decimal_id: token.decimal_id.clone(),
    })
    .unwrap();
    let signed = SignedAttestation {
        backend_attestation_signature: sign_message(&impostor, &message).unwrap().to_hex(),
        attestation_message: message,
    };
    let forged = serde_json::to_string(&SaltedMessage {
        salt: "0x01".to_string(),
        message: signed.to_json().unwrap(),
    })
    .unwrap();

    let outcome = scenario
        .container
        .unlink_accounts(&account.id.to_string(), &forged)
        .await;

    assert_eq!(outcome, UnlinkOutcome::Rejected(UnlinkError::SignatureInvalid));
    assert!(scenario.stored_account(&account).await.is_linked_to_address);
}

#[tokio::test]
async fn test_unlink_with_another_accounts_attestation_is_rejected() {
    let scenario = Scenario::new();
    let alice = scenario.add_account(Web2Provider::Twitter, "alice", Some(BasicReputation::Confirmed));
    let bob = scenario.add_account(Web2Provider::Twitter, "bob", Some(BasicReputation::Confirmed));
    linked(
        scenario
            .container
            .link_accounts(scenario.link_request(&alice))
            .await,
    );
    let bob_token = linked(
        scenario
            .container
            .link_accounts(scenario.link_request(&bob))
            .await,
    );

    let outcome = scenario
        .container
        .unlink_accounts(&alice.id.to_string(), &scenario.decrypt(&bob_token))
        .await;

    assert_eq!(outcome, UnlinkOutcome::Rejected(UnlinkError::AccountMismatch));
    assert_eq!(
        serde_json::to_value(&outcome).unwrap()["error"],
        "Web 2 accounts don't match"
    );
}
