//! Error types for the tron-wallet library

use thiserror::Error;

/// Custom error type for tron-wallet operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Mnemonic error: {0}")]
    Mnemonic(String),

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("Invalid Base58 character: {0}")]
    InvalidCharacter(String),

    #[error("Base58Check checksum mismatch")]
    ChecksumMismatch,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream provider error: {0}")]
    Upstream(String),

    #[error("All balance sources unavailable")]
    AllSourcesUnavailable,

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Whether the condition is fixable by the caller, as opposed to an
    /// upstream outage that retrying or failing over might resolve.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, Error::Upstream(_) | Error::AllSourcesUnavailable)
    }
}

/// Result type for tron-wallet operations
pub type Result<T> = std::result::Result<T, Error>;
