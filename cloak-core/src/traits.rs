//! Common traits for CLOAK.
//!
//! The string-level interface here is what wallet and ledger processes
//! consume; the typed engines in `cloak-stealth` implement it.

use crate::error::Result;
use crate::types::EthAddress;

// ═══════════════════════════════════════════════════════════════════════════════
// ANONYMOUS ADDRESS TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for generating and verifying one-time (anonymous) addresses.
///
/// Keys travel as hex strings with an optional `0x` prefix. Public keys are
/// returned in uncompressed SEC1 form without prefix.
pub trait AnonymousAddress {
    /// Sender side: derives the one-time public key for a receiver.
    fn public_key(
        &self,
        receiver_public_key_hex: &str,
        message: &[u8],
        nonce: u64,
        sender_private_key_hex: &str,
    ) -> Result<String>;

    /// Receiver side: derives the one-time private key (hex, 32 bytes).
    fn private_key(
        &self,
        receiver_private_key_hex: &str,
        message: &[u8],
        nonce: u64,
        sender_public_key_hex: &str,
    ) -> Result<String>;

    /// Checks a candidate one-time public key against the receiver's view.
    ///
    /// A mismatch is `Ok(false)`; malformed input is an error.
    fn verify(
        &self,
        public_key_hex: &str,
        receiver_private_key_hex: &str,
        message: &[u8],
        nonce: u64,
        sender_public_key_hex: &str,
    ) -> Result<bool>;

    /// Maps a public key to its account identifier.
    fn public_key_to_address(&self, public_key_hex: &str) -> Result<EthAddress>;
}
