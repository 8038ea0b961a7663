//! # Service Container
//!
//! Central container holding the subsystem services with their adapters
//! injected.

pub mod config;
pub mod locks;
pub mod subsystems;

pub use config::{ConfigError, RuntimeConfig};
pub use locks::AccountLocks;
pub use subsystems::ServiceContainer;
