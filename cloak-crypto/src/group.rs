//! The capability interface shared by both curve backends.
//!
//! A backend is selected when an engine is constructed and never switched
//! afterwards; engines are generic over [`CurveGroup`] so the point type is
//! fixed at compile time.

use rand::{CryptoRng, RngCore};

use cloak_core::error::Result;
use cloak_core::types::CurveKind;

use crate::value::CommitValue;

/// A prime-order-style group with scalar arithmetic modulo its order `n`.
///
/// Scalars produced by any method are always in `[0, n)`.
pub trait CurveGroup {
    /// Scalar modulo the group order.
    type Scalar: Copy + PartialEq + std::fmt::Debug;
    /// Group element.
    type Point: Copy + PartialEq + std::fmt::Debug;

    /// Which backend this is.
    fn kind(&self) -> CurveKind;

    /// Canonical generator `G`.
    fn generator(&self) -> Self::Point;

    /// Neutral element.
    fn identity(&self) -> Self::Point;

    /// Uniform scalar in `[0, n)` by rejection sampling.
    fn random_scalar<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Self::Scalar;

    /// Parses a big-endian scalar, failing with `InvalidScalar` if `>= n`.
    fn scalar_from_be_bytes(&self, bytes: &[u8; 32]) -> Result<Self::Scalar>;

    /// Big-endian encoding of a scalar.
    fn scalar_to_be_bytes(&self, scalar: &Self::Scalar) -> [u8; 32];

    /// Reduces an arbitrary 256-bit value modulo `n`.
    fn reduce_value(&self, value: &CommitValue) -> Self::Scalar;

    /// `(a + b) mod n`
    fn scalar_add(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// `(a - b) mod n`, normalized into `[0, n)`.
    fn scalar_sub(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Group addition.
    fn add(&self, p: &Self::Point, q: &Self::Point) -> Self::Point;

    /// Group negation.
    fn negate(&self, p: &Self::Point) -> Self::Point;

    /// `p · k`
    fn mul(&self, p: &Self::Point, k: &Self::Scalar) -> Self::Point;

    /// `p · v` for an unreduced value.
    fn mul_value(&self, p: &Self::Point, value: &CommitValue) -> Self::Point;

    /// Canonical byte encoding.
    fn encode(&self, p: &Self::Point) -> Vec<u8>;

    /// Decodes and validates a point, failing with `PointNotOnCurve`.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Point>;

    /// `p - q`
    fn sub(&self, p: &Self::Point, q: &Self::Point) -> Self::Point {
        self.add(p, &self.negate(q))
    }

    /// `G · k`
    fn mul_generator(&self, k: &Self::Scalar) -> Self::Point {
        self.mul(&self.generator(), k)
    }

    /// Equality on canonical encodings.
    fn points_equal(&self, p: &Self::Point, q: &Self::Point) -> bool {
        self.encode(p) == self.encode(q)
    }
}
