//! Mnemonic phrase generation and seed derivation

use bip39::Mnemonic;
use rand::{rngs::OsRng, RngCore};

use crate::error::{Error, Result};

/// Supported mnemonic strengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicStrength {
    /// 12 words (128 bits)
    Words12,
    /// 24 words (256 bits)
    Words24,
}

impl MnemonicStrength {
    /// Get entropy length in bytes
    fn entropy_bytes(&self) -> usize {
        match self {
            Self::Words12 => 16,
            Self::Words24 => 32,
        }
    }

    /// Build a strength from a requested word count
    pub fn from_word_count(words: usize) -> Result<Self> {
        match words {
            12 => Ok(Self::Words12),
            24 => Ok(Self::Words24),
            other => Err(Error::Mnemonic(format!(
                "unsupported word count {}, expected 12 or 24",
                other
            ))),
        }
    }
}

/// Generate a new random mnemonic phrase with the specified strength
pub fn generate_mnemonic(strength: MnemonicStrength) -> Result<String> {
    let mut entropy = vec![0u8; strength.entropy_bytes()];
    OsRng.fill_bytes(&mut entropy);

    let mnemonic = Mnemonic::from_entropy(&entropy)
        .map_err(|e| Error::Mnemonic(e.to_string()))?;

    Ok(mnemonic.to_string())
}

/// Validate a mnemonic phrase against the wordlist and checksum
pub fn validate_mnemonic(phrase: &str) -> Result<()> {
    Mnemonic::parse_normalized(phrase)
        .map(|_| ())
        .map_err(|e| Error::Mnemonic(e.to_string()))
}

/// Derive the 64-byte BIP39 seed from a mnemonic phrase and optional
/// passphrase
///
/// This runs the full PBKDF2 iteration count and is deliberately slow;
/// derive the seed once and reuse it when deriving many child keys.
pub fn mnemonic_to_seed(phrase: &str, passphrase: Option<&str>) -> Result<[u8; 64]> {
    let mnemonic = Mnemonic::parse_normalized(phrase)
        .map_err(|e| Error::Mnemonic(e.to_string()))?;

    Ok(mnemonic.to_seed(passphrase.unwrap_or("")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_mnemonic() {
        let mnemonic = generate_mnemonic(MnemonicStrength::Words12).unwrap();
        validate_mnemonic(&mnemonic).unwrap();

        let words: Vec<&str> = mnemonic.split_whitespace().collect();
        assert_eq!(words.len(), 12);

        let long = generate_mnemonic(MnemonicStrength::Words24).unwrap();
        assert_eq!(long.split_whitespace().count(), 24);
    }

    #[test]
    fn test_validate_mnemonic() {
        let invalid = "invalid mnemonic phrase test test test test test test test test test";

        assert!(validate_mnemonic(KNOWN_PHRASE).is_ok());
        assert!(validate_mnemonic(invalid).is_err());
    }

    #[test]
    fn test_strength_from_word_count() {
        assert_eq!(MnemonicStrength::from_word_count(12).unwrap(), MnemonicStrength::Words12);
        assert_eq!(MnemonicStrength::from_word_count(24).unwrap(), MnemonicStrength::Words24);
        assert!(MnemonicStrength::from_word_count(15).is_err());
    }

    #[test]
    fn test_mnemonic_to_seed_is_deterministic() {
        let seed = mnemonic_to_seed(KNOWN_PHRASE, None).unwrap();
        assert_eq!(seed, mnemonic_to_seed(KNOWN_PHRASE, None).unwrap());
        assert_ne!(seed, mnemonic_to_seed(KNOWN_PHRASE, Some("hunter2")).unwrap());
    }
}
