//! Immutable service configuration
//!
//! Loaded once at startup and shared read-only by every request. There is
//! no mutable global state in this crate.

use std::time::Duration;

/// Configuration for upstream balance providers and defaults
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the TRON node HTTP API (native balances)
    pub node_api_url: String,
    /// Base URL of the TronScan account API (token balances)
    pub scan_api_url: String,
    /// Contract address used when a token query names no contract
    pub default_contract: String,
    /// Decimals of the default contract token
    pub default_decimals: u32,
    /// Timeout applied to each upstream request
    pub request_timeout: Duration,
    /// Pause before the single retry of a failed upstream request
    pub retry_backoff: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_api_url: "https://api.trongrid.io".to_string(),
            scan_api_url: "https://apilist.tronscanapi.com".to_string(),
            // USDT TRC20 contract
            default_contract: "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t".to_string(),
            default_decimals: 6,
            request_timeout: Duration::from_secs(10),
            retry_backoff: Duration::from_millis(500),
        }
    }
}
