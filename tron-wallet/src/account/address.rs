//! TRON address derivation and Base58Check encoding

use std::fmt;

use sha2::{Digest, Sha256};
use sha3::Keccak256;

use crate::crypto::keys::PublicKey;
use crate::error::{Error, Result};

/// Version byte prefixing every mainnet address payload
pub const ADDRESS_PREFIX: u8 = 0x41;

/// Length of the raw address payload: version byte + 20-byte key hash
pub const ADDRESS_LEN: usize = 21;

const CHECKSUM_LEN: usize = 4;

/// A canonical 21-byte TRON account address
///
/// Both representations (Base58Check text and raw hex) are derived from
/// the same payload and round-trip losslessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    bytes: [u8; ADDRESS_LEN],
}

impl Address {
    /// Derive the address for a public key
    ///
    /// Keccak-256 over the 64-byte x‖y coordinates, low 20 bytes of the
    /// digest, version byte in front. Pure and deterministic.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(public_key.coordinates());
        let digest = hasher.finalize();

        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[0] = ADDRESS_PREFIX;
        bytes[1..].copy_from_slice(&digest[12..32]);
        Self { bytes }
    }

    /// Parse an address from its 42-character hex form
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let decoded = hex::decode(hex_str)
            .map_err(|e| Error::InvalidInput(format!("invalid hex address: {}", e)))?;
        if decoded.len() != ADDRESS_LEN || decoded[0] != ADDRESS_PREFIX {
            return Err(Error::InvalidInput("not a TRON hex address".to_string()));
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&decoded);
        Ok(Self { bytes })
    }

    /// Parse an address from its Base58Check text form
    pub fn from_base58(text: &str) -> Result<Self> {
        let (version, payload) = base58check_decode(text)?;
        if version != ADDRESS_PREFIX {
            return Err(Error::InvalidInput(format!(
                "unexpected address version byte 0x{:02x}",
                version
            )));
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[0] = version;
        bytes[1..].copy_from_slice(&payload);
        Ok(Self { bytes })
    }

    /// The raw 21-byte payload
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.bytes
    }

    /// Hex representation including the version prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Base58Check text representation (the familiar `T...` form)
    pub fn to_base58(&self) -> String {
        let mut payload = [0u8; ADDRESS_LEN - 1];
        payload.copy_from_slice(&self.bytes[1..]);
        base58check_encode(self.bytes[0], &payload)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

/// Encode a version byte and 20-byte payload as Base58Check text
///
/// The checksum is the first four bytes of SHA256(SHA256(version ‖
/// payload)). Leading zero bytes map to leading '1' symbols, which
/// `bs58` preserves.
pub fn base58check_encode(version: u8, payload: &[u8; ADDRESS_LEN - 1]) -> String {
    let mut buffer = Vec::with_capacity(ADDRESS_LEN + CHECKSUM_LEN);
    buffer.push(version);
    buffer.extend_from_slice(payload);

    let checksum = double_sha256(&buffer);
    buffer.extend_from_slice(&checksum[..CHECKSUM_LEN]);

    bs58::encode(buffer).into_string()
}

/// Decode Base58Check text back into its version byte and payload
pub fn base58check_decode(text: &str) -> Result<(u8, [u8; ADDRESS_LEN - 1])> {
    let decoded = bs58::decode(text)
        .into_vec()
        .map_err(|e| Error::InvalidCharacter(e.to_string()))?;

    if decoded.len() != ADDRESS_LEN + CHECKSUM_LEN {
        return Err(Error::InvalidInput(format!(
            "decoded length {} is not a versioned address",
            decoded.len()
        )));
    }

    let (body, checksum) = decoded.split_at(ADDRESS_LEN);
    let expected = double_sha256(body);
    if checksum != &expected[..CHECKSUM_LEN] {
        return Err(Error::ChecksumMismatch);
    }

    let mut payload = [0u8; ADDRESS_LEN - 1];
    payload.copy_from_slice(&body[1..]);
    Ok((body[0], payload))
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    second.into()
}
