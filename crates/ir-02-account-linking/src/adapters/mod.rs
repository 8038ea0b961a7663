//! # Adapters
//!
//! In-process implementations of the outbound ports, used by the runtime and
//! the test suites.

pub mod badge_contract;
pub mod encryption;
pub mod memory;
pub mod user_signature;

pub use badge_contract::{ChainTokenStatusRefresher, InMemoryBadgeContract};
pub use encryption::SealedBoxEncryptor;
pub use memory::{InMemoryTokenStore, InMemoryWeb2AccountStore};
pub use user_signature::Eip191UserSignatureVerifier;
