//! Normalization of upstream balance representations
//!
//! Providers disagree on the wire type of balance fields: some send a
//! JSON number of minor units, some a decimal string, some omit the
//! field entirely for empty accounts. Everything is funneled into
//! `DecimalAmount` here, at the parsing boundary, so business logic
//! never branches on wire type.

use num_bigint::BigInt;
use serde::Deserialize;

use crate::error::{Error, Result};
use super::amount::DecimalAmount;

/// A balance value exactly as a provider sent it
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawBalance {
    /// Integer minor units (`"balance": 1000001`)
    Integer(i128),
    /// Minor units as a decimal string (`"balance": "1000001"`)
    Text(String),
}

impl RawBalance {
    /// Interpret the wire value as integer minor units
    pub(crate) fn minor_units(&self) -> Result<BigInt> {
        match self {
            RawBalance::Integer(value) => Ok(BigInt::from(*value)),
            RawBalance::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(BigInt::from(0));
                }
                trimmed.parse().map_err(|_| {
                    Error::Upstream(format!("unparsable balance value: {:?}", text))
                })
            }
        }
    }
}

/// Convert an optional raw minor-unit balance into an exact amount
///
/// `None` means the upstream listed no balance record for the account,
/// which is the zero amount, not a failure.
pub fn normalize(raw: Option<&RawBalance>, decimals: u32) -> Result<DecimalAmount> {
    match raw {
        None => Ok(DecimalAmount::zero(decimals)),
        Some(raw) => Ok(DecimalAmount::from_minor_units(raw.minor_units()?, decimals)),
    }
}
