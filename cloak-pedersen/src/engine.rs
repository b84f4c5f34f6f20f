//! Pedersen commitment engine.
//!
//! ## Core Formula
//!
//! ```text
//! C = G·r + H·v
//! ```
//!
//! - `r`: blinding scalar in `[0, n)` (secret)
//! - `v`: committed value, an unreduced 256-bit integer (secret)
//! - `G`: the curve generator; `H`: the session's secondary generator
//!
//! ## Homomorphism
//!
//! ```text
//! C(r1, v1) + C(r2, v2) == C((r1 + r2) mod n, (v1 + v2) mod n)
//! C(r1, v1) - C(r2, v2) == C((r1 - r2) mod n, (v1 - v2) mod n)
//! ```
//!
//! Both sides are computed by separate code paths: [`PedersenEngine::add`] and
//! [`PedersenEngine::sub`] work on finished commitments, while
//! [`PedersenEngine::add_commitment`] and [`PedersenEngine::sub_commitment`]
//! rebuild the result from the openings.
//!
//! `commit_to` multiplies `H` by `v` as given, without reducing it first.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, instrument};

use cloak_core::error::Result;
use cloak_core::types::encoding::{decode_hex, decode_hex_integer};
use cloak_core::types::SessionParams;
use cloak_crypto::{BabyJubjub, CommitValue, CurveGroup, Secp256k1};

static SECP256K1: Secp256k1 = Secp256k1;

// ═══════════════════════════════════════════════════════════════════════════════
// VALUE TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// A commitment `C = G·r + H·v`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Commitment<P>(P);

impl<P: Copy> Commitment<P> {
    /// Wraps a point.
    pub fn from_point(point: P) -> Self {
        Self(point)
    }

    /// The underlying point.
    pub fn point(&self) -> P {
        self.0
    }
}

/// The secondary generator `H` shared by a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SecondaryGenerator<P>(P);

impl<P: Copy> SecondaryGenerator<P> {
    /// Wraps a point.
    pub fn from_point(point: P) -> Self {
        Self(point)
    }

    /// The underlying point.
    pub fn point(&self) -> P {
        self.0
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENGINE
// ═══════════════════════════════════════════════════════════════════════════════

/// Pedersen commitments over one curve backend.
pub struct PedersenEngine<'g, G: CurveGroup> {
    group: &'g G,
}

impl<'g, G: CurveGroup> Clone for PedersenEngine<'g, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'g, G: CurveGroup> Copy for PedersenEngine<'g, G> {}

impl PedersenEngine<'static, Secp256k1> {
    /// Engine over secp256k1.
    pub fn secp256k1() -> Self {
        Self::new(&SECP256K1)
    }
}

impl PedersenEngine<'static, BabyJubjub> {
    /// Engine over Baby Jubjub, loading the curve parameters if needed.
    pub async fn baby_jubjub() -> Result<Self> {
        Ok(Self::new(BabyJubjub::load().await?))
    }

    /// Engine over already-loaded Baby Jubjub parameters.
    ///
    /// # Errors
    /// `BackendNotInitialized` if [`BabyJubjub::load`] has not completed.
    pub fn baby_jubjub_loaded() -> Result<Self> {
        Ok(Self::new(BabyJubjub::get()?))
    }
}

impl<'g, G: CurveGroup> PedersenEngine<'g, G> {
    /// Engine over the given backend.
    pub fn new(group: &'g G) -> Self {
        Self { group }
    }

    /// The backend.
    pub fn group(&self) -> &'g G {
        self.group
    }

    // ─── Scalars ────────────────────────────────────────────────────────────

    /// Uniform scalar in `[0, n)` from fresh OS entropy.
    pub fn generate_random_scalar(&self) -> G::Scalar {
        self.generate_random_scalar_with(&mut OsRng)
    }

    /// Uniform scalar in `[0, n)` from the given RNG.
    pub fn generate_random_scalar_with<R: RngCore + CryptoRng>(&self, rng: &mut R) -> G::Scalar {
        self.group.random_scalar(rng)
    }

    /// Converts a value to a scalar, failing with `InvalidScalar` if `>= n`.
    pub fn scalar_from_value(&self, value: &CommitValue) -> Result<G::Scalar> {
        self.group.scalar_from_be_bytes(&value.to_be_bytes())
    }

    /// Parses a scalar from big-endian hex (optional `0x`).
    pub fn scalar_from_hex(&self, hex: &str) -> Result<G::Scalar> {
        let bytes: [u8; 32] = decode_hex_integer(hex, "scalar")?;
        self.group.scalar_from_be_bytes(&bytes)
    }

    /// 64-character lowercase hex of a scalar.
    pub fn scalar_to_hex(&self, scalar: &G::Scalar) -> String {
        hex::encode(self.group.scalar_to_be_bytes(scalar))
    }

    // ─── Secondary generator ────────────────────────────────────────────────

    /// `H = G·h` for a fresh secret `h`, which is discarded.
    pub fn generate_secondary_generator(&self) -> SecondaryGenerator<G::Point> {
        self.generate_secondary_generator_with(&mut OsRng)
    }

    /// As [`Self::generate_secondary_generator`], drawing `h` from `rng`.
    #[instrument(level = "debug", skip_all, fields(curve = %self.group.kind()))]
    pub fn generate_secondary_generator_with<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> SecondaryGenerator<G::Point> {
        let h = self.group.random_scalar(rng);
        let point = self.group.mul_generator(&h);
        debug!("Generated secondary generator");
        SecondaryGenerator(point)
    }

    /// Exports `H` for the other parties of a session.
    pub fn session_params(&self, h: &SecondaryGenerator<G::Point>) -> SessionParams {
        SessionParams::new(self.group.kind(), hex::encode(self.group.encode(&h.0)))
    }

    /// Imports `H` from session parameters.
    ///
    /// # Errors
    /// `VersionMismatch` or `CurveMismatch` for parameters of another version
    /// or backend, `PointNotOnCurve` for an invalid point.
    #[instrument(level = "debug", skip_all, fields(curve = %self.group.kind()))]
    pub fn secondary_generator_from_params(
        &self,
        params: &SessionParams,
    ) -> Result<SecondaryGenerator<G::Point>> {
        params.validate_for(self.group.kind())?;
        let bytes = decode_hex(&params.secondary_generator, "secondary generator")?;
        let point = self.group.decode(&bytes)?;
        debug!("Imported secondary generator");
        Ok(SecondaryGenerator(point))
    }

    // ─── Commitments ────────────────────────────────────────────────────────

    /// `G·r + H·v`, with `v` not reduced.
    pub fn commit_to(
        &self,
        h: &SecondaryGenerator<G::Point>,
        r: &G::Scalar,
        v: &CommitValue,
    ) -> Commitment<G::Point> {
        let blinding = self.group.mul_generator(r);
        let value = self.group.mul_value(&h.0, v);
        Commitment(self.group.add(&blinding, &value))
    }

    fn commit_scalars(
        &self,
        h: &SecondaryGenerator<G::Point>,
        r: &G::Scalar,
        v: &G::Scalar,
    ) -> Commitment<G::Point> {
        let blinding = self.group.mul_generator(r);
        let value = self.group.mul(&h.0, v);
        Commitment(self.group.add(&blinding, &value))
    }

    /// `Cx + Cy`
    pub fn add(&self, cx: &Commitment<G::Point>, cy: &Commitment<G::Point>) -> Commitment<G::Point> {
        Commitment(self.group.add(&cx.0, &cy.0))
    }

    /// `Cx + (-Cy)`
    pub fn sub(&self, cx: &Commitment<G::Point>, cy: &Commitment<G::Point>) -> Commitment<G::Point> {
        Commitment(self.group.add(&cx.0, &self.group.negate(&cy.0)))
    }

    /// Commitment to `(vx + vy) mod n` with blinding `(rx + ry) mod n`.
    pub fn add_commitment(
        &self,
        h: &SecondaryGenerator<G::Point>,
        rx: &G::Scalar,
        ry: &G::Scalar,
        vx: &CommitValue,
        vy: &CommitValue,
    ) -> Commitment<G::Point> {
        let r = self.group.scalar_add(rx, ry);
        let v = self
            .group
            .scalar_add(&self.group.reduce_value(vx), &self.group.reduce_value(vy));
        self.commit_scalars(h, &r, &v)
    }

    /// Commitment to `(vx - vy) mod n` with blinding `(rx - ry) mod n`.
    ///
    /// Negative differences wrap to `n - |d|`.
    pub fn sub_commitment(
        &self,
        h: &SecondaryGenerator<G::Point>,
        rx: &G::Scalar,
        ry: &G::Scalar,
        vx: &CommitValue,
        vy: &CommitValue,
    ) -> Commitment<G::Point> {
        let r = self.group.scalar_sub(rx, ry);
        let v = self
            .group
            .scalar_sub(&self.group.reduce_value(vx), &self.group.reduce_value(vy));
        self.commit_scalars(h, &r, &v)
    }

    /// Checks an opening `(r, v)` of `c`. A mismatch is `false`.
    pub fn verify(
        &self,
        h: &SecondaryGenerator<G::Point>,
        c: &Commitment<G::Point>,
        r: &G::Scalar,
        v: &CommitValue,
    ) -> bool {
        let expected = self.commit_to(h, r, v);
        self.group.points_equal(&expected.0, &c.0)
    }

    // ─── Encoding ───────────────────────────────────────────────────────────

    /// Hex of the backend encoding of a commitment.
    pub fn commitment_to_hex(&self, c: &Commitment<G::Point>) -> String {
        hex::encode(self.group.encode(&c.0))
    }

    /// Parses a commitment, validating the point.
    pub fn commitment_from_hex(&self, hex: &str) -> Result<Commitment<G::Point>> {
        let bytes = decode_hex(hex, "commitment")?;
        Ok(Commitment(self.group.decode(&bytes)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloak_core::error::CloakError;
    use cloak_core::types::CurveKind;
    use cloak_crypto::BabyJubjubCell;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn jubjub() -> PedersenEngine<'static, BabyJubjub> {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(PedersenEngine::baby_jubjub())
            .unwrap()
    }

    fn small<G: CurveGroup>(engine: &PedersenEngine<'_, G>, v: u64) -> G::Scalar {
        engine.scalar_from_value(&CommitValue::from(v)).unwrap()
    }

    fn check_homomorphism<G: CurveGroup>(engine: &PedersenEngine<'_, G>, seed: u64, v1: u64, v2: u64) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let h = engine.generate_secondary_generator_with(&mut rng);
        let r1 = engine.generate_random_scalar_with(&mut rng);
        let r2 = engine.generate_random_scalar_with(&mut rng);
        let (v1, v2) = (CommitValue::from(v1), CommitValue::from(v2));

        let c1 = engine.commit_to(&h, &r1, &v1);
        let c2 = engine.commit_to(&h, &r2, &v2);

        let geometric = engine.add(&c1, &c2);
        let algebraic = engine.add_commitment(&h, &r1, &r2, &v1, &v2);
        assert_eq!(geometric, algebraic);

        let group = engine.group();
        let sum = group.scalar_add(&group.reduce_value(&v1), &group.reduce_value(&v2));
        let sum = CommitValue::from_be_bytes(group.scalar_to_be_bytes(&sum));
        let direct = engine.commit_to(&h, &group.scalar_add(&r1, &r2), &sum);
        assert_eq!(geometric, direct);
        assert!(engine.verify(&h, &geometric, &group.scalar_add(&r1, &r2), &sum));

        assert_eq!(engine.sub(&c1, &c2), engine.sub_commitment(&h, &r1, &r2, &v1, &v2));
    }

    fn check_scenario<G: CurveGroup>(engine: &PedersenEngine<'_, G>) {
        let h = engine.generate_secondary_generator_with(&mut ChaCha20Rng::seed_from_u64(2024));

        let c5 = engine.commit_to(&h, &small(engine, 3), &CommitValue::from(5u64));
        let c10 = engine.commit_to(&h, &small(engine, 7), &CommitValue::from(10u64));

        let result = engine.sub(&c10, &c5);
        let expected = engine.sub_commitment(
            &h,
            &small(engine, 7),
            &small(engine, 3),
            &CommitValue::from(10u64),
            &CommitValue::from(5u64),
        );
        assert_eq!(result, expected);
        assert!(engine.verify(&h, &result, &small(engine, 4), &CommitValue::from(5u64)));
    }

    fn check_wraparound<G: CurveGroup>(engine: &PedersenEngine<'_, G>) {
        let h = engine.generate_secondary_generator_with(&mut ChaCha20Rng::seed_from_u64(9));
        let (r1, r2) = (small(engine, 3), small(engine, 7));
        let (v1, v2) = (CommitValue::from(2u64), CommitValue::from(9u64));

        let c1 = engine.commit_to(&h, &r1, &v1);
        let c2 = engine.commit_to(&h, &r2, &v2);
        let diff = engine.sub(&c1, &c2);
        assert_eq!(diff, engine.sub_commitment(&h, &r1, &r2, &v1, &v2));

        // Opening of the difference is (n - 4, n - 7)
        let group = engine.group();
        let r = group.scalar_sub(&r1, &r2);
        let v = group.scalar_sub(&group.reduce_value(&v1), &group.reduce_value(&v2));
        let v = CommitValue::from_be_bytes(group.scalar_to_be_bytes(&v));
        assert!(engine.verify(&h, &diff, &r, &v));
        assert_eq!(group.scalar_add(&r, &small(engine, 4)), small(engine, 0));
    }

    fn check_binding<G: CurveGroup>(engine: &PedersenEngine<'_, G>) {
        let mut rng = ChaCha20Rng::seed_from_u64(77);
        let h = engine.generate_secondary_generator_with(&mut rng);
        let r = engine.generate_random_scalar_with(&mut rng);
        let v = CommitValue::from(1_000u64);
        let c = engine.commit_to(&h, &r, &v);

        assert!(engine.verify(&h, &c, &r, &v));
        assert!(!engine.verify(&h, &c, &r, &CommitValue::from(1_001u64)));
        assert!(!engine.verify(&h, &c, &engine.group().scalar_add(&r, &small(engine, 1)), &v));
        for _ in 0..4 {
            let other = engine.generate_random_scalar_with(&mut rng);
            assert!(!engine.verify(&h, &c, &other, &v));
        }

        let other_h = engine.generate_secondary_generator_with(&mut rng);
        assert!(!engine.verify(&other_h, &c, &r, &v));
    }

    fn check_session_roundtrip<G: CurveGroup>(engine: &PedersenEngine<'_, G>) {
        let h = engine.generate_secondary_generator_with(&mut ChaCha20Rng::seed_from_u64(5));
        let params = engine.session_params(&h);
        assert_eq!(params.curve, engine.group().kind());

        let json = params.to_json().unwrap();
        let imported = engine
            .secondary_generator_from_params(&SessionParams::from_json(&json).unwrap())
            .unwrap();
        assert_eq!(imported, h);
    }

    // ─── secp256k1 ──────────────────────────────────────────────────────────

    #[test]
    fn test_secp_scenario() {
        check_scenario(&PedersenEngine::secp256k1());
    }

    #[test]
    fn test_secp_wraparound() {
        check_wraparound(&PedersenEngine::secp256k1());
    }

    #[test]
    fn test_secp_binding() {
        check_binding(&PedersenEngine::secp256k1());
    }

    #[test]
    fn test_secp_session_roundtrip() {
        check_session_roundtrip(&PedersenEngine::secp256k1());
    }

    #[test]
    fn test_secp_value_is_not_reduced_before_commit() {
        let engine = PedersenEngine::secp256k1();
        let h = engine.generate_secondary_generator_with(&mut ChaCha20Rng::seed_from_u64(1));
        let r = small(&engine, 11);

        let order = "115792089237316195423570985008687907852837564279074904382605163141518161494337";
        let n_plus_5 = CommitValue::from_dec_str(
            "115792089237316195423570985008687907852837564279074904382605163141518161494342",
        )
        .unwrap();
        assert!(engine.scalar_from_value(&CommitValue::from_dec_str(order).unwrap()).is_err());

        let wide = engine.commit_to(&h, &r, &n_plus_5);
        assert!(engine.verify(&h, &wide, &r, &CommitValue::from(5u64)));
    }

    #[test]
    fn test_secp_wide_values_add() {
        let engine = PedersenEngine::secp256k1();
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let h = engine.generate_secondary_generator_with(&mut rng);
        let r1 = engine.generate_random_scalar_with(&mut rng);
        let r2 = engine.generate_random_scalar_with(&mut rng);
        let v1 = CommitValue::from_be_bytes([0xff; 32]);
        let v2 = CommitValue::from_be_bytes([0xee; 32]);

        let c = engine.add(&engine.commit_to(&h, &r1, &v1), &engine.commit_to(&h, &r2, &v2));
        assert_eq!(c, engine.add_commitment(&h, &r1, &r2, &v1, &v2));
    }

    #[test]
    fn test_scalar_hex() {
        let engine = PedersenEngine::secp256k1();
        let s = engine.scalar_from_hex("0x7").unwrap();
        assert_eq!(s, small(&engine, 7));
        assert_eq!(engine.scalar_to_hex(&s), format!("{:0>64}", "7"));
        assert!(matches!(
            engine.scalar_from_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
            Err(CloakError::InvalidScalar(_))
        ));
    }

    #[test]
    fn test_commitment_hex_roundtrip() {
        let engine = PedersenEngine::secp256k1();
        let h = engine.generate_secondary_generator();
        let r = engine.generate_random_scalar();
        let c = engine.commit_to(&h, &r, &CommitValue::from(42u64));
        let parsed = engine.commitment_from_hex(&engine.commitment_to_hex(&c)).unwrap();
        assert_eq!(parsed, c);

        let bad = format!("04{}", "00".repeat(63) + "01");
        assert!(matches!(engine.commitment_from_hex(&bad), Err(CloakError::PointNotOnCurve(_))));
    }

    #[test]
    fn test_random_scalars_differ() {
        let engine = PedersenEngine::secp256k1();
        assert_ne!(engine.generate_random_scalar(), engine.generate_random_scalar());
    }

    // ─── Baby Jubjub ────────────────────────────────────────────────────────

    #[test]
    fn test_jubjub_scenario() {
        check_scenario(&jubjub());
    }

    #[test]
    fn test_jubjub_wraparound() {
        check_wraparound(&jubjub());
    }

    #[test]
    fn test_jubjub_binding() {
        check_binding(&jubjub());
    }

    #[test]
    fn test_jubjub_session_roundtrip() {
        check_session_roundtrip(&jubjub());
    }

    #[test]
    fn test_session_curve_mismatch() {
        let secp = PedersenEngine::secp256k1();
        let params = secp.session_params(&secp.generate_secondary_generator());
        assert!(matches!(
            jubjub().secondary_generator_from_params(&params),
            Err(CloakError::CurveMismatch { .. })
        ));

        let mut bad = SessionParams::new(CurveKind::BabyJubjub, String::new());
        let mut packed = [0u8; 32];
        packed[0] = 2;
        bad.secondary_generator = hex::encode(packed);
        assert!(matches!(
            jubjub().secondary_generator_from_params(&bad),
            Err(CloakError::PointNotOnCurve(_))
        ));
    }

    #[tokio::test]
    async fn test_jubjub_engine_requires_loaded_parameters() {
        let cell = BabyJubjubCell::new();
        assert!(matches!(
            cell.get().map(PedersenEngine::new),
            Err(CloakError::BackendNotInitialized(CurveKind::BabyJubjub))
        ));

        let engine = PedersenEngine::new(cell.load().await.unwrap());
        check_scenario(&engine);

        PedersenEngine::baby_jubjub().await.unwrap();
        assert!(PedersenEngine::baby_jubjub_loaded().is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_secp_homomorphism(seed in any::<u64>(), v1 in any::<u64>(), v2 in any::<u64>()) {
            check_homomorphism(&PedersenEngine::secp256k1(), seed, v1, v2);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(4))]

        #[test]
        fn prop_jubjub_homomorphism(seed in any::<u64>(), v1 in any::<u64>(), v2 in any::<u64>()) {
            check_homomorphism(&jubjub(), seed, v1, v2);
        }
    }
}
