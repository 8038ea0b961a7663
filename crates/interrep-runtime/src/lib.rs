//! # InterRep Runtime Library
//!
//! Exposes the container and configuration of the backend runtime for
//! testing. The main entry point is the `main.rs` binary.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then `IR_*` environment variables)
//! 2. Warn when the configuration is not production-ready
//! 3. Initialize subsystems in dependency order (IR-01 → IR-02 → IR-03)
//! 4. Signal ready and wait for shutdown

#![warn(clippy::all)]

pub mod container;

pub use container::{AccountLocks, ConfigError, RuntimeConfig, ServiceContainer};
