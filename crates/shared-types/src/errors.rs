//! # Error Types
//!
//! Parse failures for the shared value types.

use thiserror::Error;

/// Errors raised while parsing shared value types from their wire form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Not a `0x`-prefixed 40 hex digit string.
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    /// Mixed-case address whose casing does not match EIP-55.
    #[error("Invalid address checksum {0}")]
    InvalidChecksum(String),

    /// Unknown web2 provider name.
    #[error("Unknown web2 provider: {0}")]
    UnknownProvider(String),
}
