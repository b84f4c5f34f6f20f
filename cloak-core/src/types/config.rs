//! Configuration and session parameters.
//!
//! - [`StealthConfig`]: policy knobs for the stealth-address engine
//! - [`SessionParams`]: the shared secondary generator `H` of a commitment session

use serde::{Deserialize, Serialize};

use super::CurveKind;
use crate::constants::PROTOCOL_VERSION;
use crate::error::{CloakError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// STEALTH CONFIG
// ═══════════════════════════════════════════════════════════════════════════════

/// Configuration for the stealth-address engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StealthConfig {
    /// Accept an empty message in derivations.
    ///
    /// Off by default: an empty message fails with `MessageRequired`. When
    /// on, the empty byte string is hashed like any other message.
    #[serde(default)]
    pub allow_empty_message: bool,
}

impl StealthConfig {
    /// Checks a message against the configured policy.
    pub fn check_message(&self, message: &[u8]) -> Result<()> {
        if message.is_empty() && !self.allow_empty_message {
            return Err(CloakError::MessageRequired);
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SESSION PARAMETERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Parameters every party of a commitment session shares.
///
/// Only the coordinates of `H` are shared; the scalar it was generated from
/// is discarded at generation time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Serialization version
    pub version: u8,
    /// Curve backend the generator lives on
    pub curve: CurveKind,
    /// Hex-encoded secondary generator `H` (backend point encoding)
    pub secondary_generator: String,
}

impl SessionParams {
    /// Creates parameters at the current protocol version.
    pub fn new(curve: CurveKind, secondary_generator: String) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            curve,
            secondary_generator,
        }
    }

    /// Validates version and curve against the importing backend.
    pub fn validate_for(&self, curve: CurveKind) -> Result<()> {
        if self.version != PROTOCOL_VERSION {
            return Err(CloakError::VersionMismatch {
                expected: PROTOCOL_VERSION,
                actual: self.version,
            });
        }
        if self.curve != curve {
            return Err(CloakError::CurveMismatch {
                expected: curve,
                actual: self.curve,
            });
        }
        Ok(())
    }

    /// Serializes to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
