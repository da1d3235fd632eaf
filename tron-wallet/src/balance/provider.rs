//! Upstream balance providers
//!
//! Each provider wraps one ledger-indexing HTTP API behind the
//! `BalanceProvider` trait. Wire shapes live here and nowhere else;
//! callers only ever see minor units and typed token entries.

use async_trait::async_trait;
use num_bigint::BigInt;
use serde::Deserialize;

use crate::error::{Error, Result};
use super::normalizer::RawBalance;

/// Kind tag a provider attaches to a token entry
///
/// Matching a query against a provider's token list must compare this
/// tag, never just the identifier: a trc10 entry is not an answer to a
/// trc20 query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Trc10,
    Trc20,
    #[default]
    Other,
}

impl<'de> serde::Deserialize<'de> for TokenType {
    /// Providers are inconsistent about tag casing, so the tag itself is
    /// matched case-insensitively; unrecognized tags land on `Other` and
    /// never match a trc10/trc20 query.
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.to_ascii_lowercase().as_str() {
            "trc10" => TokenType::Trc10,
            "trc20" => TokenType::Trc20,
            _ => TokenType::Other,
        })
    }
}

/// One token row from a provider's account listing
#[derive(Debug, Clone)]
pub struct TokenBalance {
    pub token_id: String,
    pub token_type: TokenType,
    /// Minor-unit exponent as reported by the provider; `None` when the
    /// upstream lists balances without decimals metadata
    pub decimals: Option<u32>,
    pub balance: RawBalance,
}

/// An upstream service able to answer balance queries for an address
#[async_trait]
pub trait BalanceProvider: Send + Sync {
    /// Stable identifier reported in `BalanceResult.source`
    fn id(&self) -> &str;

    /// Native-coin balance in minor units; `None` when the upstream has
    /// no record for the address
    async fn native_balance(&self, address: &str) -> Result<Option<BigInt>>;

    /// All token balances the upstream lists for the address
    async fn token_balances(&self, address: &str) -> Result<Vec<TokenBalance>>;
}

/// TronGrid-style node HTTP API (`/v1/accounts/{address}`)
pub struct TronGridProvider {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct NodeAccountResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Vec<NodeAccount>,
}

#[derive(Deserialize)]
struct NodeAccount {
    balance: Option<RawBalance>,
    #[serde(default)]
    trc20: Vec<std::collections::HashMap<String, RawBalance>>,
}

impl TronGridProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_account(&self, address: &str) -> Result<NodeAccountResponse> {
        let url = format!("{}/v1/accounts/{}", self.base_url, address);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("node API request failed: {}", e)))?;

        response
            .json::<NodeAccountResponse>()
            .await
            .map_err(|e| Error::Upstream(format!("node API response unparsable: {}", e)))
    }
}

#[async_trait]
impl BalanceProvider for TronGridProvider {
    fn id(&self) -> &str {
        "trongrid"
    }

    async fn native_balance(&self, address: &str) -> Result<Option<BigInt>> {
        let account = self.fetch_account(address).await?;
        if !account.success {
            return Err(Error::Upstream("node API reported failure".to_string()));
        }

        let Some(first) = account.data.into_iter().next() else {
            return Ok(None);
        };

        match first.balance {
            None => Ok(None),
            Some(raw) => raw.minor_units().map(Some),
        }
    }

    async fn token_balances(&self, address: &str) -> Result<Vec<TokenBalance>> {
        // The node API lists trc20 holdings as {contract: amount} maps
        // without decimals metadata; the caller's asset decimals apply.
        let account = self.fetch_account(address).await?;
        let Some(first) = account.data.into_iter().next() else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for map in first.trc20 {
            for (contract, balance) in map {
                entries.push(TokenBalance {
                    token_id: contract,
                    token_type: TokenType::Trc20,
                    decimals: None,
                    balance,
                });
            }
        }
        Ok(entries)
    }
}

/// TronScan account API (`/api/accountv2?address=`)
pub struct TronScanProvider {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ScanAccountResponse {
    #[serde(rename = "withPriceTokens", default)]
    with_price_tokens: Vec<ScanToken>,
    #[serde(default)]
    balance: Option<RawBalance>,
}

#[derive(Deserialize)]
struct ScanToken {
    #[serde(rename = "tokenId", default)]
    token_id: String,
    #[serde(rename = "tokenType", default)]
    token_type: TokenType,
    #[serde(rename = "tokenDecimal", default)]
    token_decimal: u32,
    balance: Option<RawBalance>,
}

impl TronScanProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_account(&self, address: &str) -> Result<ScanAccountResponse> {
        let url = format!("{}/api/accountv2?address={}", self.base_url, address);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("scan API request failed: {}", e)))?;

        response
            .json::<ScanAccountResponse>()
            .await
            .map_err(|e| Error::Upstream(format!("scan API response unparsable: {}", e)))
    }
}

#[async_trait]
impl BalanceProvider for TronScanProvider {
    fn id(&self) -> &str {
        "tronscan"
    }

    async fn native_balance(&self, address: &str) -> Result<Option<BigInt>> {
        let account = self.fetch_account(address).await?;
        match account.balance {
            None => Ok(None),
            Some(raw) => raw.minor_units().map(Some),
        }
    }

    async fn token_balances(&self, address: &str) -> Result<Vec<TokenBalance>> {
        let account = self.fetch_account(address).await?;
        Ok(account
            .with_price_tokens
            .into_iter()
            .map(|token| TokenBalance {
                token_id: token.token_id,
                token_type: token.token_type,
                decimals: Some(token.token_decimal),
                balance: token.balance.unwrap_or(RawBalance::Integer(0)),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_type_tags() {
        assert_eq!(serde_json::from_str::<TokenType>("\"trc10\"").unwrap(), TokenType::Trc10);
        assert_eq!(serde_json::from_str::<TokenType>("\"trc20\"").unwrap(), TokenType::Trc20);
        assert_eq!(serde_json::from_str::<TokenType>("\"TRC20\"").unwrap(), TokenType::Trc20);
        assert_eq!(serde_json::from_str::<TokenType>("\"nft721\"").unwrap(), TokenType::Other);
    }

    #[test]
    fn test_scan_response_parses_mixed_wire_types() {
        let body = r#"{
            "balance": 2000000,
            "withPriceTokens": [
                {"tokenId": "_", "tokenType": "trc10", "tokenDecimal": 6, "balance": 1500000},
                {"tokenId": "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t", "tokenType": "trc20",
                 "tokenDecimal": 6, "balance": "1000001"}
            ]
        }"#;

        let parsed: ScanAccountResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.with_price_tokens.len(), 2);
        assert_eq!(parsed.with_price_tokens[0].token_type, TokenType::Trc10);
        assert_eq!(parsed.with_price_tokens[1].token_type, TokenType::Trc20);
    }

    #[test]
    fn test_node_response_shape() {
        let body = r#"{
            "success": true,
            "data": [{"balance": 7000000, "trc20": [{"TXYZ": "5"}]}]
        }"#;

        let parsed: NodeAccountResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.data.len(), 1);
    }
}
