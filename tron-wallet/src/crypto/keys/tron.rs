//! TRON key parsing, generation and BIP32 derivation

use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use secp256k1::{Scalar, Secp256k1, SecretKey, PublicKey as Secp256k1PublicKey};
use sha2::Sha512;

use crate::error::{Error, Result};
use super::derivation::{ChildIndex, DerivationPath, KeyPair, PrivateKey};

/// Parse a caller-supplied private key from its 64-character hex form
///
/// Scalars outside `(0, n)` are rejected the same way malformed hex is:
/// as caller-fixable validation errors.
pub fn parse_private_key(hex_str: &str) -> Result<PrivateKey> {
    let trimmed = hex_str.trim();
    if trimmed.len() != 64 {
        return Err(Error::InvalidKey(format!(
            "expected 64 hex characters, got {}",
            trimmed.len()
        )));
    }

    let bytes = hex::decode(trimmed)
        .map_err(|e| Error::InvalidKey(format!("invalid hex: {}", e)))?;

    let mut key = [0u8; 32];
    key.copy_from_slice(&bytes);
    PrivateKey::from_bytes(key)
}

/// Generate a fresh private key from the system CSPRNG
///
/// Rejection sampling: raw 32-byte draws outside the valid scalar range
/// are discarded and redrawn. The loop terminates almost immediately in
/// practice (the invalid range is vanishingly small), but the check is
/// required for correctness.
pub fn generate_private_key() -> PrivateKey {
    loop {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        if let Ok(key) = PrivateKey::from_bytes(bytes) {
            return key;
        }
    }
}

/// Derive a TRON key pair from a BIP39 seed and derivation path
pub fn derive_key_pair(seed: &[u8], path: &DerivationPath) -> Result<KeyPair> {
    let (mut secret_key, mut chain_code) = derive_master_key(seed)?;

    for segment in path.segments() {
        (secret_key, chain_code) = derive_child_key(secret_key, chain_code, segment)?;
    }

    let private_key = PrivateKey::from_bytes(secret_key)
        .map_err(|e| Error::KeyDerivation(e.to_string()))?;
    Ok(KeyPair::from_private_key(private_key))
}

/// Derive the BIP32 master key from a seed
fn derive_master_key(seed: &[u8]) -> Result<([u8; 32], [u8; 32])> {
    let mut hmac = Hmac::<Sha512>::new_from_slice(b"Bitcoin seed")
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

    hmac.update(seed);
    let result = hmac.finalize().into_bytes();

    let mut secret_key = [0u8; 32];
    let mut chain_code = [0u8; 32];

    secret_key.copy_from_slice(&result[0..32]);
    chain_code.copy_from_slice(&result[32..64]);

    Ok((secret_key, chain_code))
}

/// Derive a child key from a parent key
///
/// Hardened segments commit to the parent private key, normal segments to
/// the parent public key; either way the child scalar is the HMAC output
/// added to the parent scalar mod n.
fn derive_child_key(
    parent_key: [u8; 32],
    parent_chain_code: [u8; 32],
    segment: &ChildIndex,
) -> Result<([u8; 32], [u8; 32])> {
    let secp = Secp256k1::new();
    let parent_secret_key = SecretKey::from_slice(&parent_key)
        .map_err(|e| Error::KeyDerivation(format!("Invalid parent key: {}", e)))?;

    let mut data = Vec::with_capacity(37);

    if segment.hardened {
        data.push(0);
        data.extend_from_slice(&parent_key);
    } else {
        let parent_public_key = Secp256k1PublicKey::from_secret_key(&secp, &parent_secret_key);
        data.extend_from_slice(&parent_public_key.serialize());
    }

    data.extend_from_slice(&segment.raw().to_be_bytes());

    let mut hmac = Hmac::<Sha512>::new_from_slice(&parent_chain_code)
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

    hmac.update(&data);
    let result = hmac.finalize().into_bytes();

    let mut child_key = [0u8; 32];
    let mut child_chain_code = [0u8; 32];

    child_key.copy_from_slice(&result[0..32]);
    child_chain_code.copy_from_slice(&result[32..64]);

    let child_secret_key = SecretKey::from_slice(&child_key)
        .map_err(|e| Error::KeyDerivation(format!("Invalid child key: {}", e)))?;

    let child_secret_key = child_secret_key
        .add_tweak(&Scalar::from(parent_secret_key))
        .map_err(|e| Error::KeyDerivation(format!("Key addition error: {}", e)))?;

    Ok((child_secret_key.secret_bytes(), child_chain_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_bad_length() {
        assert!(parse_private_key("abcd").is_err());
        assert!(parse_private_key(&"f".repeat(63)).is_err());
        assert!(parse_private_key(&"f".repeat(65)).is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        assert!(parse_private_key(&"g".repeat(64)).is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_scalar() {
        // 2^256 - 1 is above the secp256k1 group order
        assert!(parse_private_key(&"f".repeat(64)).is_err());
        assert!(parse_private_key(&"0".repeat(64)).is_err());
    }

    #[test]
    fn test_parse_round_trips_hex() {
        let hex_key = "0000000000000000000000000000000000000000000000000000000000000001";
        let key = parse_private_key(hex_key).unwrap();
        assert_eq!(key.to_hex(), hex_key);
    }

    #[test]
    fn test_generate_produces_distinct_valid_keys() {
        let a = generate_private_key();
        let b = generate_private_key();
        assert_ne!(a, b);
        assert!(parse_private_key(&a.to_hex()).is_ok());
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let seed = [0x5e; 64];
        let path = DerivationPath::account_path(0);
        let first = derive_key_pair(&seed, &path).unwrap();
        let second = derive_key_pair(&seed, &path).unwrap();
        assert_eq!(first.private_key(), second.private_key());
    }

    #[test]
    fn test_sibling_leaves_differ() {
        let seed = [0x5e; 64];
        let a = derive_key_pair(&seed, &DerivationPath::account_path(0)).unwrap();
        let b = derive_key_pair(&seed, &DerivationPath::account_path(1)).unwrap();
        assert_ne!(a.private_key(), b.private_key());
    }
}
