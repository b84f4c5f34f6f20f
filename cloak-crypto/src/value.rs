//! Unreduced 256-bit commitment values.
//!
//! A committed value is an integer, not a scalar: it is multiplied onto the
//! secondary generator as-is and only reduced modulo the group order when two
//! values are combined.

use std::cmp::Ordering;
use std::str::FromStr;

use ark_ff::{BigInt, BigInteger};
use num_bigint::BigUint;

use cloak_core::constants::COMMIT_VALUE_SIZE;
use cloak_core::error::{CloakError, Result};

/// Four little-endian 64-bit limbs.
pub(crate) type Limbs = BigInt<4>;

// ═══════════════════════════════════════════════════════════════════════════════
// LIMB CONVERSIONS
// ═══════════════════════════════════════════════════════════════════════════════

pub(crate) fn limbs_from_be_bytes(bytes: &[u8; 32]) -> Limbs {
    let bits: Vec<bool> = bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
        .collect();
    BigInt::from_bits_be(&bits)
}

pub(crate) fn limbs_to_be_bytes(value: &Limbs) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&value.to_bytes_be());
    out
}

pub(crate) fn limbs_to_le_bytes(value: &Limbs) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&value.to_bytes_le());
    out
}

/// Parses unsigned decimal digits; `None` on anything else or above 2^256 - 1.
pub(crate) fn limbs_from_decimal(s: &str) -> Option<Limbs> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = BigUint::from_str(s).ok()?;
    BigInt::try_from(value).ok()
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMMIT VALUE
// ═══════════════════════════════════════════════════════════════════════════════

/// An unsigned integer below 2^256 committed to by a Pedersen commitment.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CommitValue(Limbs);

impl CommitValue {
    /// The value zero.
    pub const ZERO: CommitValue = CommitValue(BigInt([0, 0, 0, 0]));

    /// Creates from 32 big-endian bytes.
    pub fn from_be_bytes(bytes: [u8; COMMIT_VALUE_SIZE]) -> Self {
        Self(limbs_from_be_bytes(&bytes))
    }

    /// Returns the 32-byte big-endian representation.
    pub fn to_be_bytes(&self) -> [u8; COMMIT_VALUE_SIZE] {
        limbs_to_be_bytes(&self.0)
    }

    /// Parses a decimal string.
    ///
    /// # Errors
    /// Returns `InvalidScalar` for non-digits or values of 2^256 and above.
    pub fn from_dec_str(s: &str) -> Result<Self> {
        limbs_from_decimal(s.trim())
            .map(Self)
            .ok_or_else(|| CloakError::InvalidScalar(format!("not a 256-bit decimal integer: {s}")))
    }

    /// Returns the decimal representation.
    pub fn to_dec_string(&self) -> String {
        self.0.to_string()
    }

    /// Returns true for zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub(crate) fn limbs(&self) -> &Limbs {
        &self.0
    }

    /// Bits from most to least significant, starting at the top set bit.
    pub(crate) fn bits_msb_first(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.0.num_bits() as usize).rev().map(move |i| self.0.get_bit(i))
    }
}

impl Default for CommitValue {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u64> for CommitValue {
    fn from(v: u64) -> Self {
        Self(BigInt([v, 0, 0, 0]))
    }
}

impl From<u128> for CommitValue {
    fn from(v: u128) -> Self {
        Self(BigInt([v as u64, (v >> 64) as u64, 0, 0]))
    }
}

impl PartialOrd for CommitValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CommitValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl std::fmt::Debug for CommitValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CommitValue({})", self.to_dec_string())
    }
}

impl std::fmt::Display for CommitValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_dec_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_ff::PrimeField;
    use proptest::prelude::*;

    const MAX_DEC: &str =
        "115792089237316195423570985008687907853269984665640564039457584007913129639935";

    #[test]
    fn test_decimal_known_values() {
        assert_eq!(CommitValue::from(0u64).to_dec_string(), "0");
        assert_eq!(CommitValue::from(10u64).to_dec_string(), "10");
        assert_eq!(CommitValue::from(u64::MAX).to_dec_string(), "18446744073709551615");
        assert_eq!(
            CommitValue::from(u128::MAX).to_dec_string(),
            "340282366920938463463374607431768211455"
        );

        let max = CommitValue::from_dec_str(MAX_DEC).unwrap();
        assert_eq!(max.to_be_bytes(), [0xff; 32]);
        assert_eq!(max.to_dec_string(), MAX_DEC);
    }

    #[test]
    fn test_decimal_rejects_overflow_and_garbage() {
        // 2^256
        let overflow =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(CommitValue::from_dec_str(overflow).is_err());
        assert!(CommitValue::from_dec_str("12a").is_err());
        assert!(CommitValue::from_dec_str("").is_err());
        assert!(CommitValue::from_dec_str("-5").is_err());
    }

    #[test]
    fn test_ordering_is_numeric() {
        let small = CommitValue::from(5u64);
        let big = CommitValue::from(1u128 << 64);
        assert!(small < big);
        assert!(CommitValue::from_dec_str(MAX_DEC).unwrap() > big);
    }

    #[test]
    fn test_decimal_agrees_with_field_parsing() {
        let p_minus_1 =
            "21888242871839275222246405745257275088548364400416034343698204186575808495616";
        let value = CommitValue::from_dec_str(p_minus_1).unwrap();
        let field = Fr::from_str(p_minus_1).unwrap();
        assert_eq!(*value.limbs(), field.into_bigint());
        assert_eq!(value.to_dec_string(), field.into_bigint().to_string());
        assert_eq!(value.to_be_bytes().to_vec(), field.into_bigint().to_bytes_be());
    }

    #[test]
    fn test_decimal_rejects_signs_and_separators() {
        assert!(CommitValue::from_dec_str("+5").is_err());
        assert!(CommitValue::from_dec_str("1_000").is_err());
        assert_eq!(CommitValue::from_dec_str(" 42 ").unwrap(), CommitValue::from(42u64));
    }

    #[test]
    fn test_bits_msb_first() {
        let bits: Vec<bool> = CommitValue::from(0b1011u64).bits_msb_first().collect();
        assert_eq!(bits, vec![true, false, true, true]);
        assert_eq!(CommitValue::ZERO.bits_msb_first().count(), 0);
    }

    proptest! {
        #[test]
        fn prop_decimal_matches_u128(v in any::<u128>()) {
            let value = CommitValue::from(v);
            prop_assert_eq!(value.to_dec_string(), v.to_string());
            prop_assert_eq!(CommitValue::from_dec_str(&v.to_string()).unwrap(), value);
        }

        #[test]
        fn prop_bytes_roundtrip_through_biguint(bytes in any::<[u8; 32]>()) {
            let value = CommitValue::from_be_bytes(bytes);
            prop_assert_eq!(value.to_be_bytes(), bytes);

            let mut le = bytes;
            le.reverse();
            prop_assert_eq!(limbs_to_le_bytes(value.limbs()), le);
            prop_assert_eq!(BigUint::from(*value.limbs()), BigUint::from_bytes_be(&bytes));
            prop_assert_eq!(value.to_dec_string(), BigUint::from_bytes_be(&bytes).to_string());
        }
    }
}
