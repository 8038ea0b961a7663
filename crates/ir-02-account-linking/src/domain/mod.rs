//! # Domain Layer
//!
//! Accounts, badge tokens and the typed failures of both flows.

pub mod entities;
pub mod errors;
pub mod outcome;

pub use entities::{
    decimal_id, link_authorization_message, LinkRequest, MintReceipt, Token, TokenStatus,
    Web2Account,
};
pub use errors::{LinkError, OnchainError, StoreError, TransitionError, UnlinkError};
pub use outcome::{LinkOutcome, UnlinkOutcome, UNLINK_SUCCESS_MESSAGE};
