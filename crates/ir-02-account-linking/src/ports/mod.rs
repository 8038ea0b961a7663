//! # Ports Layer
//!
//! - **Inbound (Driving)**: `AccountLinkingApi`
//! - **Outbound (Driven)**: stores, signature verifier, badge contract, encryptor

pub mod inbound;
pub mod outbound;

pub use inbound::AccountLinkingApi;
pub use outbound::{
    AttestationEncryptor, BadgeMinter, OnchainError, StoreError, TokenStatusRefresher,
    TokenStore, UserSignatureVerifier, Web2AccountStore,
};
