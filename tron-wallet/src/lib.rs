//! TRON Wallet Core
//!
//! This library provides the core functionality of a TRON account service:
//! mnemonic generation, BIP32/BIP44 key derivation, Base58Check address
//! encoding, and exact-decimal balance aggregation across upstream
//! providers. The HTTP layer that maps these operations onto endpoints is
//! a separate concern and lives outside this crate.

pub mod error;
pub mod config;
pub mod crypto;
pub mod account;
pub mod balance;
pub mod transaction;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
