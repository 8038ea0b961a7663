//! # Runtime Configuration
//!
//! Unified configuration for the backend subsystems.
//!
//! ## Security Requirements
//!
//! - The backend signing key MUST be provided in production
//! - A configured trusted address MUST match that key

use std::fmt;

use shared_crypto::Secp256k1KeyPair;
use shared_types::{Address, ChainId};
use thiserror::Error;

use ir_03_merkle_paths::MAX_TREE_DEPTH;

/// Environment variable names.
pub mod env {
    pub const BACKEND_PRIVATE_KEY: &str = "IR_BACKEND_PRIVATE_KEY";
    pub const TRUSTED_BACKEND_ADDRESS: &str = "IR_TRUSTED_BACKEND_ADDRESS";
    pub const CHAIN_ID: &str = "IR_CHAIN_ID";
    pub const MERKLE_TREE_DEPTH: &str = "IR_MERKLE_TREE_DEPTH";
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Backend signer configuration.
    pub backend: BackendConfig,
    /// Target chain configuration.
    pub chain: ChainConfig,
    /// Group tree configuration.
    pub merkle: MerkleConfig,
}

impl RuntimeConfig {
    /// Defaults overridden from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by `lookup`, which maps variable names to values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup(env::BACKEND_PRIVATE_KEY) {
            config.backend.private_key = Some(key);
        }
        if let Some(raw) = lookup(env::TRUSTED_BACKEND_ADDRESS) {
            let address = raw.parse::<Address>().map_err(|_| ConfigError::InvalidValue {
                var: env::TRUSTED_BACKEND_ADDRESS,
                value: raw.clone(),
            })?;
            config.backend.trusted_address = Some(address);
        }
        if let Some(raw) = lookup(env::CHAIN_ID) {
            config.chain.chain_id = raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: env::CHAIN_ID,
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = lookup(env::MERKLE_TREE_DEPTH) {
            let depth: usize = raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: env::MERKLE_TREE_DEPTH,
                value: raw.clone(),
            })?;
            if depth == 0 || depth > MAX_TREE_DEPTH {
                return Err(ConfigError::InvalidTreeDepth(depth));
            }
            config.merkle.tree_depth = depth;
        }

        Ok(config)
    }

    /// Validate configuration for production readiness.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - No backend signing key is configured, or it does not parse
    /// - The trusted address differs from the key's address
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        let keypair = self
            .backend
            .keypair()?
            .ok_or(ConfigError::MissingBackendKey)?;

        if let Some(configured) = self.backend.trusted_address {
            let derived = keypair.address();
            if configured != derived {
                return Err(ConfigError::TrustedAddressMismatch {
                    configured,
                    derived,
                });
            }
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "SECURITY VIOLATION: no backend signing key. \
         Set IR_BACKEND_PRIVATE_KEY to a 32-byte hex secret."
    )]
    MissingBackendKey,

    #[error("IR_BACKEND_PRIVATE_KEY is not a valid secp256k1 secret key")]
    InvalidBackendKey,

    #[error("Trusted backend address {configured} does not match signing key address {derived}")]
    TrustedAddressMismatch { configured: Address, derived: Address },

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    #[error("Merkle tree depth {0} outside 1..=32")]
    InvalidTreeDepth(usize),
}

/// Backend signer configuration.
#[derive(Clone, Default)]
pub struct BackendConfig {
    /// Hex secp256k1 secret key used to sign attestations.
    /// An ephemeral key is generated when unset (development only).
    pub private_key: Option<String>,
    /// Address attestations must recover to. Defaults to the key's address.
    pub trusted_address: Option<Address>,
}

impl BackendConfig {
    /// Parse the configured key, if any.
    pub fn keypair(&self) -> Result<Option<Secp256k1KeyPair>, ConfigError> {
        self.private_key
            .as_deref()
            .map(|key| Secp256k1KeyPair::from_hex(key).map_err(|_| ConfigError::InvalidBackendKey))
            .transpose()
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("trusted_address", &self.trusted_address)
            .finish()
    }
}

/// Target chain configuration.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Chain id user signatures and mints are bound to.
    pub chain_id: ChainId,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self { chain_id: 31337 }
    }
}

/// Group tree configuration.
#[derive(Debug, Clone)]
pub struct MerkleConfig {
    /// Levels above the leaves of every group tree.
    pub tree_depth: usize,
}

impl Default for MerkleConfig {
    fn default() -> Self {
        Self { tree_depth: 20 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn lookup(vars: &[(&'static str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = RuntimeConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.chain.chain_id, 31337);
        assert_eq!(config.merkle.tree_depth, 20);
        assert!(config.backend.private_key.is_none());
        assert_eq!(
            config.validate_for_production(),
            Err(ConfigError::MissingBackendKey)
        );
    }

    #[test]
    fn test_environment_overrides() {
        let address = Secp256k1KeyPair::from_hex(KEY).unwrap().address();
        let config = RuntimeConfig::from_lookup(lookup(&[
            (env::BACKEND_PRIVATE_KEY, KEY),
            (env::TRUSTED_BACKEND_ADDRESS, &address.to_checksum()),
            (env::CHAIN_ID, "5"),
            (env::MERKLE_TREE_DEPTH, "16"),
        ]))
        .unwrap();

        assert_eq!(config.chain.chain_id, 5);
        assert_eq!(config.merkle.tree_depth, 16);
        assert_eq!(config.backend.trusted_address, Some(address));
        assert!(config.validate_for_production().is_ok());
    }

    #[test]
    fn test_malformed_values_rejected() {
        assert!(matches!(
            RuntimeConfig::from_lookup(lookup(&[(env::CHAIN_ID, "mainnet")])),
            Err(ConfigError::InvalidValue { var: env::CHAIN_ID, .. })
        ));
        assert!(matches!(
            RuntimeConfig::from_lookup(lookup(&[(env::TRUSTED_BACKEND_ADDRESS, "0x1234")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(
            RuntimeConfig::from_lookup(lookup(&[(env::MERKLE_TREE_DEPTH, "33")])).unwrap_err(),
            ConfigError::InvalidTreeDepth(33)
        );
    }

    #[test]
    fn test_production_rejects_mismatched_trusted_address() {
        let mut config = RuntimeConfig::default();
        config.backend.private_key = Some(KEY.to_string());
        config.backend.trusted_address = Some(Address::from_bytes([7u8; 20]));

        assert!(matches!(
            config.validate_for_production(),
            Err(ConfigError::TrustedAddressMismatch { .. })
        ));
    }

    #[test]
    fn test_production_rejects_malformed_key() {
        let mut config = RuntimeConfig::default();
        config.backend.private_key = Some("0xnot-a-key".to_string());

        assert_eq!(
            config.validate_for_production(),
            Err(ConfigError::InvalidBackendKey)
        );
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let mut config = RuntimeConfig::default();
        config.backend.private_key = Some(KEY.to_string());

        let rendered = format!("{config:?}");
        assert!(!rendered.contains(&KEY[2..]));
        assert!(rendered.contains("<redacted>"));
    }
}
