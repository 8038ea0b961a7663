//! # Ports Layer
//!
//! - **Inbound (Driving)**: `MerklePathApi`
//! - **Outbound (Driven)**: `TreeStore` snapshots, `NodeHasher`

pub mod inbound;
pub mod outbound;

pub use inbound::MerklePathApi;
pub use outbound::{NodeHasher, TreeNodeStore, TreeStore};
