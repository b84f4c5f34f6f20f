//! Curve backend identifiers.

use serde::{Deserialize, Serialize};

/// The curve backend a commitment or session belongs to.
///
/// Selected at construction time of an engine and never switched afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    /// Short-Weierstrass secp256k1 (integer modulus arithmetic).
    Secp256k1,
    /// Twisted-Edwards Baby Jubjub over the BN254 scalar field.
    BabyJubjub,
}

impl CurveKind {
    /// Stable lowercase name, as used in serialized session parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            CurveKind::Secp256k1 => "secp256k1",
            CurveKind::BabyJubjub => "babyjubjub",
        }
    }
}

impl std::fmt::Display for CurveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
