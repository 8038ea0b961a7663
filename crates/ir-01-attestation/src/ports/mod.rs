//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that the linking engines call

pub mod inbound;
