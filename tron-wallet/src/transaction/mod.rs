//! Ledger network interface
//!
//! Signing and broadcasting are delegated to an external ledger-network
//! client. This crate only defines the seam; it never fabricates
//! transaction ids or block data.

use async_trait::async_trait;

use crate::crypto::keys::PrivateKey;
use crate::error::Result;

/// An unsigned transfer payload handed to the ledger client
#[derive(Debug, Clone)]
pub struct TxPayload {
    /// Base58Check recipient address
    pub to: String,
    /// Amount in minor units, rendered as a decimal string
    pub amount: String,
    /// Optional memo attached to the transfer
    pub memo: Option<String>,
}

/// A transaction signed and ready to broadcast
#[derive(Debug, Clone)]
pub struct SignedTx {
    pub raw: Vec<u8>,
}

/// A client for the ledger network
///
/// Implementations live with the HTTP/service layer; the core calls
/// through this trait and treats the network as a collaborator.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Sign a payload with the given key
    async fn sign(&self, key: &PrivateKey, payload: TxPayload) -> Result<SignedTx>;

    /// Broadcast a signed transaction, returning the network-assigned
    /// transaction id
    async fn broadcast(&self, tx: SignedTx) -> Result<String>;
}
