//! Protocol constants for CLOAK.
//!
//! Sizes follow SEC1 (secp256k1) and the circomlib packing of Baby Jubjub
//! points. Ethereum sizes follow the yellow paper.

// ═══════════════════════════════════════════════════════════════════════════════
// SECP256K1 SIZES (SEC1)
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a secp256k1 private scalar in bytes.
pub const SECP256K1_SCALAR_SIZE: usize = 32;

/// Size of a SEC1 uncompressed public key (`04 || x || y`).
pub const SECP256K1_UNCOMPRESSED_SIZE: usize = 65;

/// Size of a raw public key without the SEC1 tag (`x || y`).
pub const SECP256K1_RAW_PUBLIC_KEY_SIZE: usize = 64;

/// Size of a SEC1 compressed public key (`02|03 || x`).
pub const SECP256K1_COMPRESSED_SIZE: usize = 33;

/// SEC1 tag byte of an uncompressed point.
pub const SEC1_UNCOMPRESSED_TAG: u8 = 0x04;

// ═══════════════════════════════════════════════════════════════════════════════
// BABY JUBJUB SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a packed Baby Jubjub point (little-endian `y`, sign of `x` in bit 255).
pub const BABYJUBJUB_PACKED_SIZE: usize = 32;

/// Size of a Baby Jubjub scalar in bytes.
pub const BABYJUBJUB_SCALAR_SIZE: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// HASH OUTPUT SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of SHA-256 output used for DKSAP domain separation.
pub const SHA256_SIZE: usize = 32;

/// Size of keccak256 hash output.
pub const KECCAK256_SIZE: usize = 32;

/// Width of the unreduced commitment value (256 bits).
pub const COMMIT_VALUE_SIZE: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// ETHEREUM CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of Ethereum address in bytes (20 bytes = 160 bits).
pub const ETH_ADDRESS_SIZE: usize = 20;

/// Optional prefix accepted on every hex input.
pub const HEX_PREFIX: &str = "0x";

// ═══════════════════════════════════════════════════════════════════════════════
// PROTOCOL VERSIONING
// ═══════════════════════════════════════════════════════════════════════════════

/// Current version of serialized session parameters.
pub const PROTOCOL_VERSION: u8 = 1;
