//! # Integration Tests
//!
//! Attestation (01), account linking (02) and Merkle paths (03) wired
//! together by the runtime container.

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod flows;
#[cfg(test)]
mod paths;
