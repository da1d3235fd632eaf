//! Bounded batch derivation of accounts from a mnemonic

use crate::crypto::keys::{derive_key_pair, DerivationPath, PrivateKey};
use crate::crypto::mnemonic::mnemonic_to_seed;
use crate::error::Result;
use super::address::Address;

/// Hard cap on entries per batch call; larger requests are clamped, not
/// rejected, so callers can paginate with a fixed page size.
pub const MAX_BATCH_SIZE: u32 = 100;

/// One derived account in a batch
#[derive(Debug, Clone)]
pub struct BatchEntry {
    /// Leaf index in the derivation path, continuous across the batch
    pub index: u32,
    pub address: Address,
    pub private_key: PrivateKey,
}

/// Derive a contiguous run of accounts from a mnemonic
///
/// Produces indices `offset, offset+1, ..` in ascending order with no
/// gaps; pagination across repeated calls relies on that continuity.
/// The expensive seed stretch runs once, the per-index child derivation
/// is cheap.
pub fn generate_batch(
    mnemonic: &str,
    passphrase: Option<&str>,
    offset: u32,
    count: u32,
) -> Result<Vec<BatchEntry>> {
    let count = count.min(MAX_BATCH_SIZE);
    let seed = mnemonic_to_seed(mnemonic, passphrase)?;

    let mut entries = Vec::with_capacity(count as usize);
    for index in offset..offset.saturating_add(count) {
        let pair = derive_key_pair(&seed, &DerivationPath::account_path(index))?;
        entries.push(BatchEntry {
            index,
            address: Address::from_public_key(pair.public_key()),
            private_key: pair.private_key().clone(),
        });
    }

    Ok(entries)
}
