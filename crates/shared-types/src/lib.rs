//! # Shared Types Crate
//!
//! Value types used across the InterRep subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: addresses, providers and reputation tiers are
//!   defined once here and re-used by attestation, linking and group crates.
//! - **Validated Construction**: an [`Address`] can only be built from 20 raw
//!   bytes or a string that passed EIP-55 validation.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
