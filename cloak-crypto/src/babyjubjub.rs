//! Twisted-Edwards backend: Baby Jubjub.
//!
//! The curve `a·x² + y² = 1 + d·x²·y²` with `a = 168700`, `d = 168696`
//! over the BN254 scalar field, in the coordinates circomlib uses. Points are
//! affine pairs of [`ark_bn254::Fr`] elements; field equality is on reduced
//! representatives, so structurally equal points are logically equal.
//!
//! ## Parameters
//!
//! The backend must be loaded once per process before use:
//!
//! ```rust,ignore
//! let params = BabyJubjub::load().await?;   // idempotent
//! let same = BabyJubjub::get()?;            // fails fast if never loaded
//! ```
//!
//! Loading validates the curve constants and the generator before any
//! arithmetic is allowed.
//!
//! ## Encoding
//!
//! ```text
//! packed = le_bytes(y)  with bit 255 set iff x > (p - 1) / 2
//! ```

use ark_bn254::Fr;
use ark_ff::{BigInt, BigInteger, Field, MontFp, One, PrimeField};
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use cloak_core::constants::{BABYJUBJUB_PACKED_SIZE, BABYJUBJUB_SCALAR_SIZE};
use cloak_core::error::{CloakError, Result};
use cloak_core::types::CurveKind;

use crate::group::CurveGroup;
use crate::value::{
    limbs_from_be_bytes, limbs_from_decimal, limbs_to_be_bytes, limbs_to_le_bytes, CommitValue,
    Limbs,
};

// ═══════════════════════════════════════════════════════════════════════════════
// CURVE CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Curve coefficient `a`.
pub const COEFF_A: Fr = MontFp!("168700");

/// Curve coefficient `d`.
pub const COEFF_D: Fr = MontFp!("168696");

const GENERATOR_X: Fr =
    MontFp!("995203441582195749578291179787384436505546430278305826713579947235728471134");
const GENERATOR_Y: Fr =
    MontFp!("5472060717959818805561601436314318772137091100104008585924551046643952123905");

const BASE8_X: Fr =
    MontFp!("5299619240641551281634865583518297030282874472190772894086521144482721001553");
const BASE8_Y: Fr =
    MontFp!("16950150798460657717958625567821834550301663161624707787222815936182638968203");

/// Full group order `8·l`.
const ORDER: Limbs = BigInt([
    0x3b94bee1c9093788,
    0x59f76dc1c9077053,
    0xb85045b68181585d,
    0x30644e72e131a029,
]);

/// Prime order `l` of the subgroup generated by Base8.
const SUB_ORDER: Limbs = BigInt([
    0x677297dc392126f1,
    0xab3eedb83920ee0a,
    0x370a08b6d0302b0b,
    0x060c89ce5c263405,
]);

/// `(p - 1) / 2`; coordinates above it are "negative" for packing.
const HALF_MODULUS: Limbs = BigInt([
    0xa1f0fac9f8000000,
    0x9419f4243cdcb848,
    0xdc2822db40c0ac2e,
    0x183227397098d014,
]);

// ═══════════════════════════════════════════════════════════════════════════════
// POINTS
// ═══════════════════════════════════════════════════════════════════════════════

/// An affine Baby Jubjub point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdwardsPoint {
    x: Fr,
    y: Fr,
}

impl EdwardsPoint {
    /// The neutral element `(0, 1)`.
    pub const IDENTITY: EdwardsPoint = EdwardsPoint {
        x: MontFp!("0"),
        y: MontFp!("1"),
    };

    /// Creates a point, checking the curve equation.
    pub fn new(x: Fr, y: Fr) -> Result<Self> {
        let point = Self { x, y };
        if !point.is_on_curve() {
            return Err(CloakError::PointNotOnCurve(format!(
                "({}, {}) is not on Baby Jubjub",
                x.into_bigint(),
                y.into_bigint()
            )));
        }
        Ok(point)
    }

    /// The x coordinate.
    pub fn x(&self) -> Fr {
        self.x
    }

    /// The y coordinate.
    pub fn y(&self) -> Fr {
        self.y
    }

    /// Checks `a·x² + y² == 1 + d·x²·y²`.
    pub fn is_on_curve(&self) -> bool {
        let x2 = self.x.square();
        let y2 = self.y.square();
        COEFF_A * x2 + y2 == Fr::one() + COEFF_D * x2 * y2
    }

    /// Group addition (circomlib `addPoint`).
    pub fn add(&self, other: &Self) -> Self {
        let beta = self.x * other.y;
        let gamma = self.y * other.x;
        let delta = (self.y - COEFF_A * self.x) * (other.x + other.y);
        let dtau = COEFF_D * beta * gamma;

        // With d a non-square the law is complete: neither denominator
        // vanishes for points on the curve.
        let x = (beta + gamma) * (Fr::one() + dtau).inverse().unwrap_or_default();
        let y = (delta + COEFF_A * beta - gamma) * (Fr::one() - dtau).inverse().unwrap_or_default();
        Self { x, y }
    }

    /// `2·P`
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// `-P = (-x, y)`
    pub fn neg(&self) -> Self {
        Self { x: -self.x, y: self.y }
    }

    /// Double-and-add over bits given most significant first.
    ///
    /// Not constant time.
    pub(crate) fn mul_bits<I: Iterator<Item = bool>>(&self, bits: I) -> Self {
        let mut acc = Self::IDENTITY;
        for bit in bits {
            acc = acc.double();
            if bit {
                acc = acc.add(self);
            }
        }
        acc
    }

    fn mul_limbs(&self, k: &Limbs) -> Self {
        self.mul_bits((0..k.num_bits() as usize).rev().map(|i| k.get_bit(i)))
    }

    /// `P · k`
    pub fn mul_scalar(&self, k: &JubjubScalar) -> Self {
        self.mul_limbs(&k.0)
    }

    /// Packs into 32 bytes (circomlib `packPoint`).
    pub fn pack(&self) -> [u8; BABYJUBJUB_PACKED_SIZE] {
        let mut out = limbs_to_le_bytes(&self.y.into_bigint());
        if self.x.into_bigint() > HALF_MODULUS {
            out[31] |= 0x80;
        }
        out
    }

    /// Unpacks 32 bytes, recovering `x` from the curve equation.
    pub fn unpack(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; BABYJUBJUB_PACKED_SIZE] = bytes.try_into().map_err(|_| {
            CloakError::PointNotOnCurve(format!(
                "packed point must be {BABYJUBJUB_PACKED_SIZE} bytes, got {}",
                bytes.len()
            ))
        })?;

        let mut y_bytes = bytes;
        let negative = y_bytes[31] & 0x80 != 0;
        y_bytes[31] &= 0x7f;

        let y = BigInt::try_from(BigUint::from_bytes_le(&y_bytes))
            .ok()
            .and_then(Fr::from_bigint)
            .ok_or_else(|| CloakError::PointNotOnCurve("y is not below the field modulus".into()))?;

        let y2 = y.square();
        let den = (COEFF_A - COEFF_D * y2)
            .inverse()
            .ok_or_else(|| CloakError::PointNotOnCurve("no x for this y".into()))?;
        let mut x = ((Fr::one() - y2) * den)
            .sqrt()
            .ok_or_else(|| CloakError::PointNotOnCurve("no x for this y".into()))?;

        if x.into_bigint() > HALF_MODULUS {
            x = -x;
        }
        if negative {
            x = -x;
        }
        Self::new(x, y)
    }

    /// Parses decimal coordinates.
    pub fn from_decimal(x: &str, y: &str) -> Result<Self> {
        Self::new(parse_coordinate(x)?, parse_coordinate(y)?)
    }

    /// Decimal coordinates `(x, y)`.
    pub fn to_decimal(&self) -> (String, String) {
        (
            self.x.into_bigint().to_string(),
            self.y.into_bigint().to_string(),
        )
    }
}

fn parse_coordinate(s: &str) -> Result<Fr> {
    limbs_from_decimal(s.trim())
        .and_then(Fr::from_bigint)
        .ok_or_else(|| CloakError::PointNotOnCurve(format!("not a field element: {s}")))
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCALARS
// ═══════════════════════════════════════════════════════════════════════════════

/// An integer modulo the full group order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JubjubScalar(Limbs);

impl JubjubScalar {
    /// Zero.
    pub const ZERO: JubjubScalar = JubjubScalar(BigInt([0, 0, 0, 0]));

    /// Parses a big-endian scalar; values `>= order` are rejected.
    pub fn from_be_bytes(bytes: &[u8; BABYJUBJUB_SCALAR_SIZE]) -> Result<Self> {
        let value = limbs_from_be_bytes(bytes);
        if value >= ORDER {
            return Err(CloakError::InvalidScalar(
                "scalar is not below the Baby Jubjub group order".into(),
            ));
        }
        Ok(Self(value))
    }

    /// Big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; BABYJUBJUB_SCALAR_SIZE] {
        limbs_to_be_bytes(&self.0)
    }

    /// Small scalar.
    pub fn from_u64(v: u64) -> Self {
        Self(BigInt([v, 0, 0, 0]))
    }

    fn reduce(value: &Limbs) -> Self {
        // 2^256 < 6·order, so this runs at most five times.
        let mut v = *value;
        while v >= ORDER {
            v.sub_with_borrow(&ORDER);
        }
        Self(v)
    }

    fn add(&self, other: &Self) -> Self {
        // Both operands are below 2^254: no carry out.
        let mut sum = self.0;
        sum.add_with_carry(&other.0);
        Self::reduce(&sum)
    }

    fn sub(&self, other: &Self) -> Self {
        let mut diff = self.0;
        if diff.sub_with_borrow(&other.0) {
            diff.add_with_carry(&ORDER);
        }
        Self(diff)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// BACKEND PARAMETERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Validated Baby Jubjub parameters; the backend handle.
#[derive(Debug)]
pub struct BabyJubjub {
    generator: EdwardsPoint,
    base8: EdwardsPoint,
}

/// A once-initialized slot holding [`BabyJubjub`] parameters.
pub struct BabyJubjubCell {
    cell: OnceCell<BabyJubjub>,
}

static PARAMS: BabyJubjubCell = BabyJubjubCell::new();

impl BabyJubjubCell {
    /// An empty slot.
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    /// Loads the parameters, or returns the ones already loaded.
    ///
    /// Concurrent callers wait for a single initialization.
    pub async fn load(&self) -> Result<&BabyJubjub> {
        if let Some(params) = self.cell.get() {
            debug!(curve = %CurveKind::BabyJubjub, "Curve parameters already loaded");
            return Ok(params);
        }
        self.cell
            .get_or_try_init(|| async { BabyJubjub::validated() })
            .await
    }

    /// Returns the loaded parameters without waiting.
    ///
    /// # Errors
    /// `BackendNotInitialized` if [`BabyJubjubCell::load`] has not completed.
    pub fn get(&self) -> Result<&BabyJubjub> {
        self.cell
            .get()
            .ok_or(CloakError::BackendNotInitialized(CurveKind::BabyJubjub))
    }
}

impl Default for BabyJubjubCell {
    fn default() -> Self {
        Self::new()
    }
}

impl BabyJubjub {
    /// Loads the process-wide parameters (idempotent).
    pub async fn load() -> Result<&'static BabyJubjub> {
        PARAMS.load().await
    }

    /// The process-wide parameters, if loaded.
    pub fn get() -> Result<&'static BabyJubjub> {
        PARAMS.get()
    }

    /// Base8 = 8·G, generator of the prime-order subgroup.
    pub fn base8(&self) -> EdwardsPoint {
        self.base8
    }

    #[instrument(level = "debug")]
    fn validated() -> Result<Self> {
        if COEFF_A.sqrt().is_none() {
            return Err(CloakError::InternalError("curve coefficient a is not a square".into()));
        }
        if COEFF_D.sqrt().is_some() {
            return Err(CloakError::InternalError("curve coefficient d is a square".into()));
        }

        let generator = EdwardsPoint::new(GENERATOR_X, GENERATOR_Y)?;
        let base8 = EdwardsPoint::new(BASE8_X, BASE8_Y)?;

        if generator.mul_limbs(&BigInt([8, 0, 0, 0])) != base8 {
            return Err(CloakError::InternalError("8·G != Base8".into()));
        }
        if base8.mul_limbs(&SUB_ORDER) != EdwardsPoint::IDENTITY {
            return Err(CloakError::InternalError("Base8 is not of order l".into()));
        }

        info!(curve = %CurveKind::BabyJubjub, "Loaded curve parameters");
        Ok(Self { generator, base8 })
    }
}

impl CurveGroup for BabyJubjub {
    type Scalar = JubjubScalar;
    type Point = EdwardsPoint;

    fn kind(&self) -> CurveKind {
        CurveKind::BabyJubjub
    }

    fn generator(&self) -> EdwardsPoint {
        self.generator
    }

    fn identity(&self) -> EdwardsPoint {
        EdwardsPoint::IDENTITY
    }

    fn random_scalar<R: RngCore + CryptoRng>(&self, rng: &mut R) -> JubjubScalar {
        loop {
            let mut bytes = [0u8; BABYJUBJUB_SCALAR_SIZE];
            rng.fill_bytes(&mut bytes);
            // order < 2^254
            bytes[0] &= 0x3f;
            if let Ok(scalar) = JubjubScalar::from_be_bytes(&bytes) {
                return scalar;
            }
        }
    }

    fn scalar_from_be_bytes(&self, bytes: &[u8; 32]) -> Result<JubjubScalar> {
        JubjubScalar::from_be_bytes(bytes)
    }

    fn scalar_to_be_bytes(&self, scalar: &JubjubScalar) -> [u8; 32] {
        scalar.to_be_bytes()
    }

    fn reduce_value(&self, value: &CommitValue) -> JubjubScalar {
        JubjubScalar::reduce(value.limbs())
    }

    fn scalar_add(&self, a: &JubjubScalar, b: &JubjubScalar) -> JubjubScalar {
        a.add(b)
    }

    fn scalar_sub(&self, a: &JubjubScalar, b: &JubjubScalar) -> JubjubScalar {
        a.sub(b)
    }

    fn add(&self, p: &EdwardsPoint, q: &EdwardsPoint) -> EdwardsPoint {
        p.add(q)
    }

    fn negate(&self, p: &EdwardsPoint) -> EdwardsPoint {
        p.neg()
    }

    fn mul(&self, p: &EdwardsPoint, k: &JubjubScalar) -> EdwardsPoint {
        p.mul_scalar(k)
    }

    fn mul_value(&self, p: &EdwardsPoint, value: &CommitValue) -> EdwardsPoint {
        p.mul_bits(value.bits_msb_first())
    }

    fn encode(&self, p: &EdwardsPoint) -> Vec<u8> {
        p.pack().to_vec()
    }

    fn decode(&self, bytes: &[u8]) -> Result<EdwardsPoint> {
        EdwardsPoint::unpack(bytes)
    }
}
