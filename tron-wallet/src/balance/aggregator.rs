//! Multi-source balance aggregation with retry and failover

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use super::amount::DecimalAmount;
use super::normalizer::normalize;
use super::provider::{BalanceProvider, TokenType, TronGridProvider, TronScanProvider};

/// What the caller is asking the balance of
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetId {
    /// The chain's native coin
    Native,
    /// A token identified by contract address or token id
    Token {
        contract: String,
        token_type: TokenType,
    },
}

/// A balance-bearing asset and its display precision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: AssetId,
    pub symbol: String,
    /// Minor-unit exponent, 0..=18
    pub decimals: u32,
}

impl Asset {
    /// The native TRX asset (SUN minor units)
    pub fn native() -> Self {
        Self {
            id: AssetId::Native,
            symbol: "TRX".to_string(),
            decimals: 6,
        }
    }

    /// A TRC20 token asset
    pub fn trc20(contract: impl Into<String>, symbol: impl Into<String>, decimals: u32) -> Self {
        Self {
            id: AssetId::Token {
                contract: contract.into(),
                token_type: TokenType::Trc20,
            },
            symbol: symbol.into(),
            decimals,
        }
    }

    /// A TRC10 token asset
    pub fn trc10(token_id: impl Into<String>, symbol: impl Into<String>, decimals: u32) -> Self {
        Self {
            id: AssetId::Token {
                contract: token_id.into(),
                token_type: TokenType::Trc10,
            },
            symbol: symbol.into(),
            decimals,
        }
    }
}

/// An (address, asset) balance question
#[derive(Debug, Clone)]
pub struct BalanceQuery {
    pub address: String,
    pub asset: Asset,
}

/// A normalized balance answer
#[derive(Debug, Clone)]
pub struct BalanceResult {
    pub asset: Asset,
    pub amount: DecimalAmount,
    /// Id of the provider that answered
    pub source: String,
    /// Unix seconds at which the answer was fetched
    pub fetched_at: u64,
}

/// Queries providers in order with per-call timeout, one retry, and
/// failover
///
/// An upstream that answers but lists no matching entry yields a zero
/// amount; only exhausting every provider is an error.
pub struct BalanceAggregator {
    providers: Vec<Arc<dyn BalanceProvider>>,
    request_timeout: Duration,
    retry_backoff: Duration,
}

impl BalanceAggregator {
    pub fn new(providers: Vec<Arc<dyn BalanceProvider>>, config: &Config) -> Self {
        Self {
            providers,
            request_timeout: config.request_timeout,
            retry_backoff: config.retry_backoff,
        }
    }

    /// The standard provider chain: the node API first, the scan API as
    /// fallback (and as the source of token decimals metadata)
    pub fn from_config(config: &Config) -> Self {
        let providers: Vec<Arc<dyn BalanceProvider>> = vec![
            Arc::new(TronGridProvider::new(config.node_api_url.clone())),
            Arc::new(TronScanProvider::new(config.scan_api_url.clone())),
        ];
        Self::new(providers, config)
    }

    /// Resolve a balance query against the configured providers
    pub async fn fetch(&self, query: &BalanceQuery) -> Result<BalanceResult> {
        for provider in &self.providers {
            match self.try_provider_with_retry(provider.as_ref(), query).await {
                Ok(amount) => {
                    return Ok(BalanceResult {
                        asset: query.asset.clone(),
                        amount,
                        source: provider.id().to_string(),
                        fetched_at: unix_now(),
                    });
                }
                Err(e) => {
                    warn!(provider = provider.id(), error = %e, "balance provider failed");
                }
            }
        }

        Err(Error::AllSourcesUnavailable)
    }

    async fn try_provider_with_retry(
        &self,
        provider: &dyn BalanceProvider,
        query: &BalanceQuery,
    ) -> Result<DecimalAmount> {
        match self.try_provider(provider, query).await {
            Ok(amount) => Ok(amount),
            Err(first) => {
                debug!(provider = provider.id(), error = %first, "retrying after backoff");
                tokio::time::sleep(self.retry_backoff).await;
                self.try_provider(provider, query).await
            }
        }
    }

    async fn try_provider(
        &self,
        provider: &dyn BalanceProvider,
        query: &BalanceQuery,
    ) -> Result<DecimalAmount> {
        let attempt = self.query_once(provider, query);
        tokio::time::timeout(self.request_timeout, attempt)
            .await
            .map_err(|_| Error::Upstream(format!("provider {} timed out", provider.id())))?
    }

    async fn query_once(
        &self,
        provider: &dyn BalanceProvider,
        query: &BalanceQuery,
    ) -> Result<DecimalAmount> {
        let decimals = query.asset.decimals;
        match &query.asset.id {
            AssetId::Native => {
                let units = provider.native_balance(&query.address).await?;
                match units {
                    None => Ok(DecimalAmount::zero(decimals)),
                    Some(units) => Ok(DecimalAmount::from_minor_units(units, decimals)),
                }
            }
            AssetId::Token { contract, token_type } => {
                let listing = provider.token_balances(&query.address).await?;
                let entry = listing.iter().find(|token| {
                    token.token_type == *token_type
                        && token.token_id.eq_ignore_ascii_case(contract)
                });
                match entry {
                    // No matching record is a valid empty balance
                    None => Ok(DecimalAmount::zero(decimals)),
                    Some(token) => {
                        // Provider-reported decimals win; fall back to the
                        // asset's configured precision when absent
                        normalize(Some(&token.balance), token.decimals.unwrap_or(decimals))
                    }
                }
            }
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
