//! Hex normalisation shared by every key and point codec.
//!
//! All hex inputs accept an optional `0x` prefix. Integer-valued inputs
//! (private scalars) additionally accept odd-length strings, the form a
//! big-integer library produces when it drops leading zeros.

use crate::constants::HEX_PREFIX;
use crate::error::{CloakError, Result};

/// Strips an optional `0x`/`0X` prefix and surrounding whitespace.
pub fn strip_hex_prefix(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix(HEX_PREFIX)
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decodes hex bytes, accepting an optional `0x` prefix.
///
/// `what` names the input in the error message.
pub fn decode_hex(s: &str, what: &str) -> Result<Vec<u8>> {
    let s = strip_hex_prefix(s);
    if s.is_empty() {
        return Err(CloakError::InvalidKeyEncoding(format!("{what}: empty hex string")));
    }
    hex::decode(s).map_err(|e| CloakError::bad_hex(what, e))
}

/// Decodes a big-endian unsigned integer into exactly `N` bytes.
///
/// Odd-length and short inputs are left-padded with zeros; inputs wider than
/// `N` bytes fail with `InvalidKeyEncoding` even if their leading bytes are
/// zero-valued hex digits beyond the width.
pub fn decode_hex_integer<const N: usize>(s: &str, what: &str) -> Result<[u8; N]> {
    let s = strip_hex_prefix(s);
    if s.is_empty() {
        return Err(CloakError::InvalidKeyEncoding(format!("{what}: empty hex string")));
    }

    let padded;
    let even = if s.len() % 2 == 1 {
        padded = format!("0{s}");
        padded.as_str()
    } else {
        s
    };

    let bytes = hex::decode(even).map_err(|e| CloakError::bad_hex(what, e))?;
    let significant = bytes.iter().skip_while(|&&b| b == 0).count();
    if significant > N {
        return Err(CloakError::InvalidKeyEncoding(format!(
            "{what}: expected at most {N} bytes, got {significant}"
        )));
    }

    let mut out = [0u8; N];
    out[N - significant..].copy_from_slice(&bytes[bytes.len() - significant..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("0xabcd", "abcd" ; "lowercase prefix")]
    #[test_case("0XABCD", "ABCD" ; "uppercase prefix")]
    #[test_case("abcd", "abcd" ; "no prefix")]
    #[test_case("  0xab  ", "ab" ; "whitespace")]
    fn test_strip_hex_prefix(input: &str, expected: &str) {
        assert_eq!(strip_hex_prefix(input), expected);
    }

    #[test]
    fn test_decode_hex_rejects_garbage() {
        assert!(matches!(decode_hex("0xzz", "key"), Err(CloakError::InvalidKeyEncoding(_))));
        assert!(matches!(decode_hex("", "key"), Err(CloakError::InvalidKeyEncoding(_))));
        assert!(matches!(decode_hex("0x", "key"), Err(CloakError::InvalidKeyEncoding(_))));
        assert!(matches!(decode_hex("abc", "key"), Err(CloakError::InvalidKeyEncoding(_))));
    }

    #[test]
    fn test_decode_hex_integer_pads() {
        let out: [u8; 4] = decode_hex_integer("0x1", "scalar").unwrap();
        assert_eq!(out, [0, 0, 0, 1]);

        let out: [u8; 4] = decode_hex_integer("abc", "scalar").unwrap();
        assert_eq!(out, [0, 0, 0x0a, 0xbc]);

        let out: [u8; 4] = decode_hex_integer("0000000001020304", "scalar").unwrap();
        assert_eq!(out, [1, 2, 3, 4]);
    }

    #[test]
    fn test_decode_hex_integer_rejects_wide() {
        let err = decode_hex_integer::<4>("0102030405", "scalar").unwrap_err();
        assert!(matches!(err, CloakError::InvalidKeyEncoding(_)));
    }

    proptest! {
        #[test]
        fn prop_decode_hex_integer_accepts_minimal_hex(v in any::<u64>()) {
            let expected = v.to_be_bytes();
            let minimal = format!("{v:x}");
            prop_assert_eq!(decode_hex_integer::<8>(&minimal, "scalar").unwrap(), expected);
            prop_assert_eq!(decode_hex_integer::<8>(&format!("0x{minimal}"), "scalar").unwrap(), expected);
            prop_assert_eq!(decode_hex_integer::<8>(&hex::encode(expected), "scalar").unwrap(), expected);
        }
    }
}
