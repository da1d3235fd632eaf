//! Exact fixed-point decimal amounts
//!
//! All balance math in this crate goes through `DecimalAmount`. The value
//! is an arbitrary-precision integer mantissa plus a decimals exponent;
//! binary floating point never enters, so 0.1 is exactly 0.1.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::error::{Error, Result};

/// An exact decimal value: `mantissa / 10^decimals`
#[derive(Debug, Clone)]
pub struct DecimalAmount {
    mantissa: BigInt,
    decimals: u32,
}

impl DecimalAmount {
    /// Build an amount from integer minor units and a decimals exponent
    pub fn from_minor_units(minor_units: impl Into<BigInt>, decimals: u32) -> Self {
        Self {
            mantissa: minor_units.into(),
            decimals,
        }
    }

    /// The zero amount at a given precision
    pub fn zero(decimals: u32) -> Self {
        Self {
            mantissa: BigInt::zero(),
            decimals,
        }
    }

    /// Parse a decimal string (`"12"`, `"-0.5"`, `"1.000001"`) at a given
    /// precision
    ///
    /// Fractional digits beyond `decimals` are truncated toward zero,
    /// never rounded.
    pub fn from_text(text: &str, decimals: u32) -> Result<Self> {
        let trimmed = text.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(Error::InvalidInput(format!("not a decimal number: {:?}", text)));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(Error::InvalidInput(format!("not a decimal number: {:?}", text)));
        }

        let mut mantissa: BigInt = if int_part.is_empty() {
            BigInt::zero()
        } else {
            int_part.parse()
                .map_err(|_| Error::InvalidInput(format!("not a decimal number: {:?}", text)))?
        };
        mantissa *= pow10(decimals);

        // Truncate the fraction to the target precision
        let kept = &frac_part[..frac_part.len().min(decimals as usize)];
        if !kept.is_empty() {
            let frac: BigInt = kept.parse()
                .map_err(|_| Error::InvalidInput(format!("not a decimal number: {:?}", text)))?;
            mantissa += frac * pow10(decimals - kept.len() as u32);
        }

        if negative {
            mantissa = -mantissa;
        }

        Ok(Self { mantissa, decimals })
    }

    /// The decimals exponent this amount is scaled to
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// The integer mantissa in minor units
    pub fn minor_units(&self) -> &BigInt {
        &self.mantissa
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Exact sum; the result carries the finer of the two precisions
    pub fn add(&self, other: &Self) -> Self {
        let decimals = self.decimals.max(other.decimals);
        let lhs = self.rescaled_mantissa(decimals);
        let rhs = other.rescaled_mantissa(decimals);
        Self {
            mantissa: lhs + rhs,
            decimals,
        }
    }

    /// Render with exactly `decimals` fractional digits, truncating toward
    /// zero
    pub fn to_text(&self) -> String {
        if self.decimals == 0 {
            return self.mantissa.to_string();
        }

        let scale = pow10(self.decimals);
        let abs = self.mantissa.abs();
        let int_part = &abs / &scale;
        let frac_part = &abs % &scale;

        let sign = if self.mantissa.is_negative() { "-" } else { "" };
        format!(
            "{}{}.{:0>width$}",
            sign,
            int_part,
            frac_part.to_string(),
            width = self.decimals as usize
        )
    }

    fn rescaled_mantissa(&self, decimals: u32) -> BigInt {
        debug_assert!(decimals >= self.decimals);
        &self.mantissa * pow10(decimals - self.decimals)
    }
}

fn pow10(exponent: u32) -> BigInt {
    num_traits::pow(BigInt::from(10), exponent as usize)
}

impl PartialEq for DecimalAmount {
    /// Equality by rational value: 1.10 at 2 decimals equals 1.1 at 1
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DecimalAmount {}

impl PartialOrd for DecimalAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DecimalAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        let decimals = self.decimals.max(other.decimals);
        self.rescaled_mantissa(decimals)
            .cmp(&other.rescaled_mantissa(decimals))
    }
}

impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_exact() {
        assert_eq!(DecimalAmount::from_minor_units(1_000_001, 6).to_text(), "1.000001");
        assert_eq!(DecimalAmount::from_minor_units(0, 6).to_text(), "0.000000");
        assert_eq!(DecimalAmount::from_minor_units(1, 6).to_text(), "0.000001");
        assert_eq!(DecimalAmount::from_minor_units(42, 0).to_text(), "42");
        assert_eq!(DecimalAmount::from_minor_units(-1_500_000, 6).to_text(), "-1.500000");
    }

    #[test]
    fn test_tenth_is_exact() {
        let tenth = DecimalAmount::from_text("0.1", 18).unwrap();
        assert_eq!(tenth.to_text(), "0.100000000000000000");

        let mut sum = DecimalAmount::zero(18);
        for _ in 0..10 {
            sum = sum.add(&tenth);
        }
        assert_eq!(sum, DecimalAmount::from_text("1", 18).unwrap());
    }

    #[test]
    fn test_from_text_matches_minor_units() {
        assert_eq!(
            DecimalAmount::from_text("1.5", 6).unwrap(),
            DecimalAmount::from_minor_units(1_500_000, 6)
        );
        assert_eq!(
            DecimalAmount::from_text("-2", 2).unwrap(),
            DecimalAmount::from_minor_units(-200, 2)
        );
    }

    #[test]
    fn test_from_text_truncates_toward_zero() {
        assert_eq!(
            DecimalAmount::from_text("1.999999", 2).unwrap(),
            DecimalAmount::from_minor_units(199, 2)
        );
        assert_eq!(
            DecimalAmount::from_text("-1.999", 2).unwrap(),
            DecimalAmount::from_minor_units(-199, 2)
        );
    }

    #[test]
    fn test_from_text_rejects_garbage() {
        assert!(DecimalAmount::from_text("", 6).is_err());
        assert!(DecimalAmount::from_text(".", 6).is_err());
        assert!(DecimalAmount::from_text("1,5", 6).is_err());
        assert!(DecimalAmount::from_text("1e6", 6).is_err());
    }

    #[test]
    fn test_equality_ignores_trailing_zero_padding() {
        let coarse = DecimalAmount::from_minor_units(11, 1);
        let fine = DecimalAmount::from_minor_units(1_100_000, 6);
        assert_eq!(coarse, fine);
        assert!(coarse < DecimalAmount::from_minor_units(1_100_001, 6));
    }

    #[test]
    fn test_add_never_loses_precision() {
        // A value beyond u128 range still sums exactly
        let big = DecimalAmount::from_text(
            "340282366920938463463374607431768211456.000000000000000001",
            18,
        )
        .unwrap();
        let sum = big.add(&DecimalAmount::from_minor_units(1, 18));
        assert_eq!(
            sum.to_text(),
            "340282366920938463463374607431768211456.000000000000000002"
        );
    }
}
