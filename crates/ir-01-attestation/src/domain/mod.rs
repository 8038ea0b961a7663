//! # Domain Layer
//!
//! Pure codec and signature logic with no I/O dependencies.

pub mod codec;
pub mod ecdsa;
pub mod entities;
pub mod errors;
