//! # Account Linking Subsystem (IR-02)
//!
//! Binds a reputation-bearing web2 account to an address by minting a badge
//! token and handing the user an encrypted backend attestation, and unbinds
//! them again once the badge has been burned on-chain.
//!
//! ## Architecture
//!
//! ```text
//! ir-02-account-linking/
//! ├── domain/     # Web2Account, Token, decimalId, LinkError, UnlinkError
//! ├── ports/      # AccountLinkingApi, stores, minter, refresher, encryptor
//! ├── service/    # link.rs / unlink.rs gate chains
//! └── adapters/   # In-memory stores, simulated badge contract, EIP-191, sealed box
//! ```
//!
//! ## Error Styles
//!
//! | Operation | Failure shape |
//! |-----------|---------------|
//! | `link_accounts` | `Err(LinkError)`, one variant per gate |
//! | `unlink_accounts` | Never fails; `UnlinkOutcome::Rejected(UnlinkError)` |
//!
//! Both convert into `{success, ...}` boundary results (`LinkOutcome`,
//! `UnlinkOutcome`).
//!
//! ## Concurrency
//!
//! Both flows read then write `isLinkedToAddress` and token state. Calls for
//! the same web2 account must be serialized by the caller.

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    ChainTokenStatusRefresher, Eip191UserSignatureVerifier, InMemoryBadgeContract,
    InMemoryTokenStore, InMemoryWeb2AccountStore, SealedBoxEncryptor,
};
pub use domain::{
    decimal_id, link_authorization_message, LinkError, LinkOutcome, LinkRequest, MintReceipt,
    Token, TokenStatus, TransitionError, UnlinkError, UnlinkOutcome, Web2Account,
    UNLINK_SUCCESS_MESSAGE,
};
pub use ports::{
    AccountLinkingApi, AttestationEncryptor, BadgeMinter, OnchainError, StoreError,
    TokenStatusRefresher, TokenStore, UserSignatureVerifier, Web2AccountStore,
};
pub use service::{AccountLinkingService, LinkingDependencies};
