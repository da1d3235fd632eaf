//! Key material and derivation
//!
//! This module provides validated secp256k1 key material and BIP32
//! hierarchical derivation along TRON account paths.

mod derivation;
pub mod tron;

pub use derivation::*;
pub use tron::*;
