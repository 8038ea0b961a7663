//! # Attestation Subsystem (IR-01)
//!
//! Canonical encoding, signing and verification of the backend attestation
//! that binds a web2 identity, an address and a badge token id.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Canonical codec and EIP-191 recovery, no I/O
//! - **Ports Layer** (`ports/`): The `AttestationApi` consumed by linking
//! - **Service Layer** (`service.rs`): Holds the injected backend key
//!
//! ## Wire Contract
//!
//! The attestation message is compact JSON with a fixed key order:
//!
//! ```text
//! {"service":"InterRep","decimalId":"..","userAddress":"0x..","web2Provider":"..","providerAccountId":".."}
//! ```
//!
//! Signing and verification recompute it independently, so the byte layout
//! must never change.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: Signatures with high S values are rejected
//! - **Trusted Signer**: Verification compares the recovered signer against the
//!   configured backend address only

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::codec::{canonicalize, decode, parse_decrypted_attestation};
pub use domain::ecdsa::{eip191_hash, recover_message_signer, sign_message, verify_message};
pub use domain::entities::{
    AttestationFields, AttestationMessage, SignedAttestation, ATTESTATION_SERVICE,
};
pub use domain::errors::AttestationError;
pub use ports::inbound::AttestationApi;
pub use service::AttestationService;
