//! Public key → account identifier.
//!
//! ```text
//! address = keccak256(uncompressed_pk[1..65])[12..32]
//! ```
//!
//! displayed in EIP-55 checksum case.

use k256::PublicKey;

use cloak_core::constants::{ETH_ADDRESS_SIZE, KECCAK256_SIZE};
use cloak_core::error::Result;
use cloak_core::types::EthAddress;
use cloak_crypto::keccak256;
use cloak_crypto::secp256k1::{parse_public_key, uncompressed_bytes};

/// Derives the address of a parsed public key.
pub fn address_from_public_key(public: &PublicKey) -> EthAddress {
    let encoded = uncompressed_bytes(public);
    let hash = keccak256(&encoded[1..]);

    let mut bytes = [0u8; ETH_ADDRESS_SIZE];
    bytes.copy_from_slice(&hash[KECCAK256_SIZE - ETH_ADDRESS_SIZE..]);
    EthAddress::from_array(bytes)
}

/// Derives the address of a hex public key.
///
/// Accepts the same encodings as key parsing: optional `0x`, and
/// uncompressed, raw or compressed points.
///
/// # Errors
/// `InvalidKeyEncoding` if the input is not a secp256k1 point.
pub fn public_key_to_address(public_key_hex: &str) -> Result<EthAddress> {
    Ok(address_from_public_key(&parse_public_key(public_key_hex)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloak_core::CloakError;
    use test_case::test_case;

    const PK: &str = "043dfddf56028982b8e1ab9279b7487952712f0e08409a46a933f5c52886f129d58706a270294e80637fcf181303b4d2311de9ee47ec57c60a10c0c0886e26a215";
    const ADDRESS: &str = "0x78DB2F1965916BB49c567c33124674F5D042E85a";

    #[test_case(PK ; "bare")]
    #[test_case(&format!("0x{PK}") ; "prefixed")]
    #[test_case(&PK[2..] ; "raw")]
    #[test_case("033dfddf56028982b8e1ab9279b7487952712f0e08409a46a933f5c52886f129d5" ; "compressed")]
    fn test_regression_address(input: &str) {
        assert_eq!(public_key_to_address(input).unwrap().to_checksum_string(), ADDRESS);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(public_key_to_address("0x1234"), Err(CloakError::InvalidKeyEncoding(_))));
        assert!(matches!(public_key_to_address("not hex"), Err(CloakError::InvalidKeyEncoding(_))));
    }
}
