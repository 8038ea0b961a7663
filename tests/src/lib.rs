//! # InterRep Test Suite
//!
//! Unified test crate for flows that cross subsystem boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs   # Runtime container, wallet, encryption key
//!     ├── flows.rs      # Link / unlink scenarios through the container
//!     └── paths.rs      # Merkle group paths
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ir-tests
//! cargo test -p ir-tests integration::flows::
//! ```

pub mod integration;
