//! Cryptographic primitives and operations
//!
//! This module provides functionality for mnemonic generation and
//! hierarchical key derivation for TRON accounts.

pub mod mnemonic;
pub mod keys;

pub use mnemonic::*;
pub use keys::*;
