//! Hash primitives.
//!
//! SHA-256 digests feed the stealth-address tweak and are exchanged as
//! lowercase hex text, so every helper here that produces an intermediate
//! digest returns the hex string rather than raw bytes.

use sha2::Sha256;
use sha3::{Digest, Keccak256};

use cloak_core::constants::{KECCAK256_SIZE, SHA256_SIZE};

// ═══════════════════════════════════════════════════════════════════════════════
// SHA-256
// ═══════════════════════════════════════════════════════════════════════════════

/// Computes SHA-256.
pub fn sha256(input: &[u8]) -> [u8; SHA256_SIZE] {
    Sha256::digest(input).into()
}

/// Computes SHA-256 and returns the lowercase hex digest.
pub fn sha256_hex(input: &[u8]) -> String {
    hex::encode(sha256(input))
}

// ═══════════════════════════════════════════════════════════════════════════════
// KECCAK256 (for Ethereum addresses)
// ═══════════════════════════════════════════════════════════════════════════════

/// Computes Keccak256 hash (used for Ethereum addresses).
///
/// Note: Keccak256 is NOT SHA3-256. They use different padding.
pub fn keccak256(input: &[u8]) -> [u8; KECCAK256_SIZE] {
    Keccak256::digest(input).into()
}
