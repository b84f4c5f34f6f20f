//! Field-native digest of a ledger transfer.
//!
//! Binds a transfer into a single BN254 scalar-field element that both the
//! stealth derivation (as message bytes) and circuits over the Edwards
//! backend's field can consume:
//!
//! ```text
//! m = H(H(H(nonce, F(pk_sender)), F(pk_receiver)), amount)
//! ```
//!
//! `H` is two-input Poseidon with circom parameters and `F(pk)` reads the
//! key's bytes as a big-endian integer reduced into the field.

use ark_bn254::Fr;
use ark_ff::PrimeField;
use light_poseidon::{Poseidon, PoseidonHasher};

use cloak_core::error::{CloakError, Result};
use cloak_core::types::encoding::decode_hex;

/// Two-input circom Poseidon.
pub fn poseidon2(a: Fr, b: Fr) -> Result<Fr> {
    let mut hasher =
        Poseidon::<Fr>::new_circom(2).map_err(|e| CloakError::HashError(e.to_string()))?;
    hasher
        .hash(&[a, b])
        .map_err(|e| CloakError::HashError(e.to_string()))
}

/// Reduces arbitrary bytes, read big-endian, into the field.
pub fn bytes_to_field(bytes: &[u8]) -> Fr {
    Fr::from_be_bytes_mod_order(bytes)
}

/// Decimal representation of a field element.
pub fn field_to_decimal(value: &Fr) -> String {
    value.into_bigint().to_string()
}

/// Digest of a transfer of `amount` from `sender` to `receiver`.
///
/// Public keys are hex with an optional `0x` prefix, in whatever encoding the
/// parties agreed on; the bytes are hashed as given. Returns the decimal
/// string of the digest, ready to be used as a stealth message.
///
/// This is a Poseidon digest. It does not interoperate with transfer
/// messages built with MiMC7: both parties must derive the message here.
pub fn transfer_message(
    nonce: u64,
    sender_public_key_hex: &str,
    receiver_public_key_hex: &str,
    amount: u64,
) -> Result<String> {
    let sender = bytes_to_field(&decode_hex(sender_public_key_hex, "sender public key")?);
    let receiver = bytes_to_field(&decode_hex(receiver_public_key_hex, "receiver public key")?);

    let m1 = poseidon2(Fr::from(nonce), sender)?;
    let m2 = poseidon2(m1, receiver)?;
    let m3 = poseidon2(m2, Fr::from(amount))?;
    Ok(field_to_decimal(&m3))
}
