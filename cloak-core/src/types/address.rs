//! Account identifiers derived from one-time public keys.
//!
//! - [`EthAddress`]: 20-byte identifier, displayed in EIP-55 checksum case

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::constants::ETH_ADDRESS_SIZE;
use crate::error::{CloakError, Result};
use crate::types::encoding::strip_hex_prefix;

// ═══════════════════════════════════════════════════════════════════════════════
// ETHEREUM ADDRESS
// ═══════════════════════════════════════════════════════════════════════════════

/// A 20-byte Ethereum account identifier.
///
/// Produced by hashing an uncompressed public key with keccak256 and keeping
/// the last 20 bytes. Serializes as its checksummed string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EthAddress {
    bytes: [u8; ETH_ADDRESS_SIZE],
}

impl EthAddress {
    /// Creates an address from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ETH_ADDRESS_SIZE {
            return Err(CloakError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ETH_ADDRESS_SIZE,
                bytes.len()
            )));
        }

        let mut arr = [0u8; ETH_ADDRESS_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Creates from a fixed-size array.
    pub fn from_array(bytes: [u8; ETH_ADDRESS_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the EIP-55 checksummed hex string with `0x` prefix.
    ///
    /// A hex letter is upper-cased when the matching nibble of
    /// `keccak256(lowercase_hex)` is 8 or greater.
    pub fn to_checksum_string(&self) -> String {
        let lower = hex::encode(self.bytes);
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Parses from hex string (with or without 0x prefix, any case).
    ///
    /// The checksum is not enforced; use [`EthAddress::from_checksummed`] for
    /// that.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(strip_hex_prefix(s))
            .map_err(|e| CloakError::InvalidAddress(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Parses a mixed-case address and rejects it if the checksum is wrong.
    ///
    /// All-lowercase and all-uppercase inputs carry no checksum and are
    /// accepted as-is.
    pub fn from_checksummed(s: &str) -> Result<Self> {
        let address = Self::from_hex(s)?;
        let body = strip_hex_prefix(s);
        let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = body.chars().any(|c| c.is_ascii_uppercase());

        if has_lower && has_upper && address.to_checksum_string()[2..] != *body {
            return Err(CloakError::InvalidAddress(format!("bad EIP-55 checksum: {s}")));
        }
        Ok(address)
    }
}

impl std::fmt::Debug for EthAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EthAddress({})", self.to_checksum_string())
    }
}

impl std::fmt::Display for EthAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_checksum_string())
    }
}

impl Serialize for EthAddress {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_checksum_string())
    }
}

impl<'de> Deserialize<'de> for EthAddress {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_checksummed(&s).map_err(serde::de::Error::custom)
    }
}
