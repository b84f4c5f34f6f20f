//! Error types for CLOAK.
//!
//! Every failure surfaced by the stealth-address and commitment engines is a
//! local validation failure detected before any arithmetic runs. None of them
//! is retryable: the same malformed input can never succeed on a second try.

use thiserror::Error;

use crate::types::CurveKind;

/// Result type alias using `CloakError`.
pub type Result<T> = std::result::Result<T, CloakError>;

/// Main error type for all CLOAK operations.
#[derive(Debug, Error)]
pub enum CloakError {
    // ═══════════════════════════════════════════════════════════════════════════
    // KEY & POINT ENCODING ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Malformed hex, wrong length, scalar out of range or point not on curve
    /// while decoding a key.
    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// Scalar outside `[0, n)` where a strict range is required.
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// Decoded point fails the curve equation.
    #[error("Point not on curve: {0}")]
    PointNotOnCurve(String),

    /// Malformed 20-byte account identifier.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // PROTOCOL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Empty message bound into a stealth derivation.
    #[error("A non-empty message is required for stealth derivation")]
    MessageRequired,

    /// Backend parameters were used before their one-time initialization.
    #[error("Curve backend {0} is not initialized")]
    BackendNotInitialized(CurveKind),

    /// Session parameters belong to another curve backend.
    #[error("Curve mismatch: expected {expected}, got {actual}")]
    CurveMismatch {
        /// Curve of the engine that was asked to import the parameters
        expected: CurveKind,
        /// Curve recorded in the parameters
        actual: CurveKind,
    },

    /// Algebraic hash failure (e.g. wrong arity).
    #[error("Hash error: {0}")]
    HashError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Protocol version mismatch.
    #[error("Protocol version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Version this build reads and writes
        expected: u8,
        /// Version recorded in the parameters
        actual: u8,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl CloakError {
    /// Shorthand for a malformed-hex key error.
    pub fn bad_hex(what: &str, err: hex::FromHexError) -> Self {
        CloakError::InvalidKeyEncoding(format!("{what}: {err}"))
    }

    /// Returns true if this error is recoverable (can retry).
    ///
    /// All CLOAK errors are deterministic validation failures.
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Returns true if this is a cryptographic error.
    pub fn is_crypto_error(&self) -> bool {
        matches!(
            self,
            CloakError::InvalidKeyEncoding(_)
                | CloakError::InvalidScalar(_)
                | CloakError::PointNotOnCurve(_)
                | CloakError::HashError(_)
        )
    }

    /// Returns true if this is a validation error.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            CloakError::InvalidKeyEncoding(_)
                | CloakError::InvalidScalar(_)
                | CloakError::PointNotOnCurve(_)
                | CloakError::InvalidAddress(_)
                | CloakError::MessageRequired
                | CloakError::CurveMismatch { .. }
                | CloakError::VersionMismatch { .. }
        )
    }
}
