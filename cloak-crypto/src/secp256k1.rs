//! Short-Weierstrass backend: secp256k1.
//!
//! Wraps `k256` for both roles the curve plays:
//!
//! - **Keys**: hex codecs for private scalars and SEC1 public keys, and the
//!   Diffie-Hellman shared secret used by stealth derivation
//! - **Commitments**: the [`CurveGroup`] implementation used by the
//!   commitment engine
//!
//! Public keys are always re-encoded uncompressed (`04 || x || y`).

use k256::ecdh::diffie_hellman;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::PrimeField;
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, PublicKey, Scalar, SecretKey, U256};
use rand::{CryptoRng, RngCore};

use cloak_core::constants::{
    SECP256K1_COMPRESSED_SIZE, SECP256K1_RAW_PUBLIC_KEY_SIZE, SECP256K1_SCALAR_SIZE,
    SECP256K1_UNCOMPRESSED_SIZE, SEC1_UNCOMPRESSED_TAG,
};
use cloak_core::error::{CloakError, Result};
use cloak_core::types::encoding::{decode_hex, decode_hex_integer};
use cloak_core::types::CurveKind;

use crate::group::CurveGroup;
use crate::value::CommitValue;

// ═══════════════════════════════════════════════════════════════════════════════
// KEY CODECS
// ═══════════════════════════════════════════════════════════════════════════════

/// Parses a private key from hex.
///
/// Accepts an optional `0x` prefix and big-integer style hex (odd length,
/// leading zeros dropped). The scalar must be in `[1, n)`.
pub fn parse_secret_key(hex: &str) -> Result<SecretKey> {
    let bytes: [u8; SECP256K1_SCALAR_SIZE] = decode_hex_integer(hex, "private key")?;
    SecretKey::from_slice(&bytes).map_err(|_| {
        CloakError::InvalidKeyEncoding("private key: scalar is zero or not below the group order".into())
    })
}

/// Parses a public key from hex.
///
/// Accepts uncompressed (65 bytes), raw `x || y` (64 bytes) and compressed
/// (33 bytes) encodings, each with an optional `0x` prefix.
pub fn parse_public_key(hex: &str) -> Result<PublicKey> {
    let mut bytes = decode_hex(hex, "public key")?;
    if bytes.len() == SECP256K1_RAW_PUBLIC_KEY_SIZE {
        bytes.insert(0, SEC1_UNCOMPRESSED_TAG);
    }

    match bytes.len() {
        SECP256K1_UNCOMPRESSED_SIZE | SECP256K1_COMPRESSED_SIZE => {}
        len => {
            return Err(CloakError::InvalidKeyEncoding(format!(
                "public key: unexpected length {len}"
            )))
        }
    }

    PublicKey::from_sec1_bytes(&bytes)
        .map_err(|_| CloakError::InvalidKeyEncoding("public key: not a point on secp256k1".into()))
}

/// Uncompressed SEC1 bytes of a public key.
pub fn uncompressed_bytes(public: &PublicKey) -> [u8; SECP256K1_UNCOMPRESSED_SIZE] {
    let encoded = public.to_encoded_point(false);
    let mut out = [0u8; SECP256K1_UNCOMPRESSED_SIZE];
    out.copy_from_slice(encoded.as_bytes());
    out
}

/// Lowercase hex of the uncompressed SEC1 encoding, without prefix.
pub fn encode_public_key(public: &PublicKey) -> String {
    hex::encode(uncompressed_bytes(public))
}

/// Lowercase 64-character hex of a private scalar.
pub fn encode_secret_key(secret: &SecretKey) -> String {
    hex::encode(secret.to_bytes())
}

/// The x coordinate of `secret · public` as minimal lowercase hex.
///
/// Leading zero nibbles are dropped, so the result is shorter than 64
/// characters for about one shared secret in sixteen.
pub fn shared_secret_x_hex(secret: &SecretKey, public: &PublicKey) -> String {
    let shared = diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
    let full = hex::encode(shared.raw_secret_bytes());
    match full.trim_start_matches('0') {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// GROUP BACKEND
// ═══════════════════════════════════════════════════════════════════════════════

/// A secp256k1 group element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeierstrassPoint(pub ProjectivePoint);

impl From<PublicKey> for WeierstrassPoint {
    fn from(public: PublicKey) -> Self {
        Self(public.to_projective())
    }
}

/// The secp256k1 backend handle. Stateless: all parameters are constants.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1;

impl CurveGroup for Secp256k1 {
    type Scalar = Scalar;
    type Point = WeierstrassPoint;

    fn kind(&self) -> CurveKind {
        CurveKind::Secp256k1
    }

    fn generator(&self) -> WeierstrassPoint {
        WeierstrassPoint(ProjectivePoint::GENERATOR)
    }

    fn identity(&self) -> WeierstrassPoint {
        WeierstrassPoint(ProjectivePoint::IDENTITY)
    }

    fn random_scalar<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Scalar {
        loop {
            let mut bytes = FieldBytes::default();
            rng.fill_bytes(&mut bytes);
            if let Some(scalar) = Option::<Scalar>::from(Scalar::from_repr(bytes)) {
                return scalar;
            }
        }
    }

    fn scalar_from_be_bytes(&self, bytes: &[u8; 32]) -> Result<Scalar> {
        Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(*bytes))).ok_or_else(|| {
            CloakError::InvalidScalar("scalar is not below the secp256k1 group order".into())
        })
    }

    fn scalar_to_be_bytes(&self, scalar: &Scalar) -> [u8; 32] {
        scalar.to_bytes().into()
    }

    fn reduce_value(&self, value: &CommitValue) -> Scalar {
        <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(value.to_be_bytes()))
    }

    fn scalar_add(&self, a: &Scalar, b: &Scalar) -> Scalar {
        a + b
    }

    fn scalar_sub(&self, a: &Scalar, b: &Scalar) -> Scalar {
        a - b
    }

    fn add(&self, p: &WeierstrassPoint, q: &WeierstrassPoint) -> WeierstrassPoint {
        WeierstrassPoint(p.0 + q.0)
    }

    fn negate(&self, p: &WeierstrassPoint) -> WeierstrassPoint {
        WeierstrassPoint(-p.0)
    }

    fn mul(&self, p: &WeierstrassPoint, k: &Scalar) -> WeierstrassPoint {
        WeierstrassPoint(p.0 * k)
    }

    fn mul_value(&self, p: &WeierstrassPoint, value: &CommitValue) -> WeierstrassPoint {
        // Every point has order n, so P·v == P·(v mod n).
        WeierstrassPoint(p.0 * self.reduce_value(value))
    }

    fn encode(&self, p: &WeierstrassPoint) -> Vec<u8> {
        p.0.to_affine().to_encoded_point(false).as_bytes().to_vec()
    }

    fn decode(&self, bytes: &[u8]) -> Result<WeierstrassPoint> {
        let encoded = EncodedPoint::from_bytes(bytes)
            .map_err(|e| CloakError::PointNotOnCurve(format!("bad SEC1 encoding: {e}")))?;
        Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .map(|affine| WeierstrassPoint(affine.into()))
            .ok_or_else(|| CloakError::PointNotOnCurve("not a point on secp256k1".into()))
    }
}
