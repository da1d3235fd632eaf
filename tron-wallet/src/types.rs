//! Response envelope and closed payload shapes
//!
//! The HTTP layer wraps every operation result in the same envelope:
//! `{code, msg, data, time}` with `code=1` for success and `code=0` for a
//! caller-facing failure. Building the envelope here keeps the core free
//! of any HTTP dependency while still giving the outer layer a closed,
//! serializable shape per operation instead of loose maps.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::account::{Address, BatchEntry};
use crate::balance::BalanceResult;
use crate::crypto::keys::PrivateKey;

/// The uniform response envelope
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// 1 on success, 0 on caller-facing failure
    pub code: u8,
    pub msg: String,
    pub data: Option<T>,
    /// Unix seconds at which the envelope was built
    pub time: u64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(msg: impl Into<String>, data: T) -> Self {
        Self {
            code: 1,
            msg: msg.into(),
            data: Some(data),
            time: unix_now(),
        }
    }

    pub fn fail(msg: impl Into<String>) -> Self {
        Self {
            code: 0,
            msg: msg.into(),
            data: None,
            time: unix_now(),
        }
    }

    /// Fold an operation result into the envelope, using the error's
    /// display text as the caller-facing message
    pub fn from_result(msg: impl Into<String>, result: crate::Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(msg, data),
            Err(e) => Self::fail(e.to_string()),
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Payload for address generation and key-to-address operations
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfo {
    pub private_key: String,
    pub address: String,
    pub hex_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
}

impl AddressInfo {
    pub fn new(private_key: &PrivateKey, address: &Address, mnemonic: Option<String>) -> Self {
        Self {
            private_key: private_key.to_hex(),
            address: address.to_base58(),
            hex_address: address.to_hex(),
            mnemonic,
        }
    }
}

/// Payload for one entry of a batch derivation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntryInfo {
    pub offset: u32,
    pub address: String,
    pub private_key: String,
}

impl From<&BatchEntry> for BatchEntryInfo {
    fn from(entry: &BatchEntry) -> Self {
        Self {
            offset: entry.index,
            address: entry.address.to_base58(),
            private_key: entry.private_key.to_hex(),
        }
    }
}

/// Payload for balance lookups
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceInfo {
    pub balance: String,
    pub address: String,
    pub symbol: String,
    pub source: String,
}

impl BalanceInfo {
    pub fn new(address: impl Into<String>, result: &BalanceResult) -> Self {
        Self {
            balance: result.amount.to_text(),
            address: address.into(),
            symbol: result.asset.symbol.clone(),
            source: result.source.clone(),
        }
    }
}
