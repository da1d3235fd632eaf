//! Key material and derivation path types

use std::fmt;
use std::str::FromStr;

use secp256k1::{Secp256k1, SecretKey, PublicKey as Secp256k1PublicKey};

use crate::error::{Error, Result};

/// TRON uses the standard BIP44 coin type 195
pub const TRON_COIN_TYPE: u32 = 195;

/// A validated secp256k1 private key scalar
///
/// The invariant `0 < value < n` is enforced at construction; any byte
/// array that reaches a `PrivateKey` is a usable signing key. The raw
/// bytes are never logged; `Debug` redacts them.
#[derive(Clone)]
pub struct PrivateKey {
    secret: SecretKey,
}

impl PrivateKey {
    /// Create a private key from raw bytes, rejecting scalars outside the
    /// curve order
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self> {
        let secret = SecretKey::from_slice(&bytes)
            .map_err(|e| Error::InvalidKey(format!("scalar out of range: {}", e)))?;
        Ok(Self { secret })
    }

    /// Get the raw private key bytes
    pub fn to_bytes(&self) -> [u8; 32] {
        self.secret.secret_bytes()
    }

    /// Hex encoding of the key, for response payloads
    pub fn to_hex(&self) -> String {
        hex::encode(self.secret.secret_bytes())
    }

    /// Derive the corresponding public key
    pub fn public_key(&self) -> PublicKey {
        let secp = Secp256k1::new();
        let public = Secp256k1PublicKey::from_secret_key(&secp, &self.secret);
        PublicKey {
            bytes: public.serialize_uncompressed(),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.secret == other.secret
    }
}

impl Eq for PrivateKey {}

/// An uncompressed secp256k1 public key (65 bytes, 0x04 prefix)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    bytes: [u8; 65],
}

impl PublicKey {
    /// Get the full serialized form including the 0x04 prefix
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.bytes
    }

    /// The 64-byte x‖y body used for address hashing
    pub fn coordinates(&self) -> &[u8] {
        &self.bytes[1..]
    }
}

/// A private/public key pair
#[derive(Debug, Clone)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Build a key pair from a validated private key
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        Self { private_key, public_key }
    }

    /// Get the private key
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Get the public key
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

/// One segment of a BIP32 derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildIndex {
    pub index: u32,
    pub hardened: bool,
}

impl ChildIndex {
    /// The raw index with the hardened bit applied
    pub fn raw(&self) -> u32 {
        if self.hardened {
            0x8000_0000 + self.index
        } else {
            self.index
        }
    }
}

/// An ordered BIP32 derivation path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath(Vec<ChildIndex>);

impl DerivationPath {
    /// The standard TRON account path `m/44'/195'/0'/0/{leaf}`
    pub fn account_path(leaf: u32) -> Self {
        Self(vec![
            ChildIndex { index: 44, hardened: true },
            ChildIndex { index: TRON_COIN_TYPE, hardened: true },
            ChildIndex { index: 0, hardened: true },
            ChildIndex { index: 0, hardened: false },
            ChildIndex { index: leaf, hardened: false },
        ])
    }

    /// Iterate over the path segments in order
    pub fn segments(&self) -> impl Iterator<Item = &ChildIndex> {
        self.0.iter()
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self> {
        if !path.starts_with("m/") {
            return Err(Error::KeyDerivation(format!("Invalid derivation path: {}", path)));
        }

        let mut segments = Vec::new();
        for component in path.trim_start_matches("m/").split('/') {
            if component.is_empty() {
                continue;
            }

            let hardened = component.ends_with('\'');
            let index = component.trim_end_matches('\'').parse::<u32>()
                .map_err(|_| Error::KeyDerivation(
                    format!("Invalid derivation path component: {}", component)))?;

            segments.push(ChildIndex { index, hardened });
        }

        Ok(Self(segments))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for segment in &self.0 {
            write!(f, "/{}", segment.index)?;
            if segment.hardened {
                f.write_str("'")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_parse_and_display() {
        let path: DerivationPath = "m/44'/195'/0'/0/7".parse().unwrap();
        assert_eq!(path, DerivationPath::account_path(7));
        assert_eq!(path.to_string(), "m/44'/195'/0'/0/7");
    }

    #[test]
    fn test_path_rejects_garbage() {
        assert!("44'/195'".parse::<DerivationPath>().is_err());
        assert!("m/44x".parse::<DerivationPath>().is_err());
    }

    #[test]
    fn test_private_key_debug_is_redacted() {
        let key = PrivateKey::from_bytes([7u8; 32]).unwrap();
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains("07"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn test_zero_scalar_rejected() {
        assert!(PrivateKey::from_bytes([0u8; 32]).is_err());
    }
}
