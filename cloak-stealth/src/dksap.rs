//! Dual-key stealth address derivation.
//!
//! ## Protocol
//!
//! ```text
//! S     = sk_self · pk_other                       (same point on both sides)
//! t     = SHA256(hex(SHA256(x(S))) || hex(SHA256(hex(m))) || dec(nonce)) mod n
//!
//! sender:    P_one  = pk_receiver + G·t
//! receiver:  sk_one = (sk_receiver + t) mod n,  P_one = G·sk_one
//! ```
//!
//! `x(S)` is the minimal lowercase hex of the shared point's x coordinate and
//! every intermediate digest is hashed as lowercase hex text. The nonce is its
//! decimal string; changing any of these encodings changes every derived key.

use k256::elliptic_curve::ops::Reduce;
use k256::{FieldBytes, NonZeroScalar, ProjectivePoint, PublicKey, Scalar, SecretKey, U256};
use subtle::ConstantTimeEq;
use tracing::{debug, instrument};

use cloak_core::error::{CloakError, Result};
use cloak_core::traits::AnonymousAddress;
use cloak_core::types::{EthAddress, StealthConfig};
use cloak_crypto::hash::{sha256, sha256_hex};
use cloak_crypto::secp256k1::{
    encode_public_key, encode_secret_key, parse_public_key, parse_secret_key, shared_secret_x_hex,
    uncompressed_bytes,
};

use crate::address::public_key_to_address;
use crate::keys::KeyPair;

// ═══════════════════════════════════════════════════════════════════════════════
// TWEAK
// ═══════════════════════════════════════════════════════════════════════════════

/// Computes the tweak scalar `t` from the shared secret's x hex.
pub fn stealth_tweak(shared_x_hex: &str, message: &[u8], nonce: u64) -> Scalar {
    let share_hash = sha256_hex(shared_x_hex.as_bytes());
    let message_hash = sha256_hex(hex::encode(message).as_bytes());
    let digest = sha256(format!("{share_hash}{message_hash}{nonce}").as_bytes());
    <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(digest))
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENGINE
// ═══════════════════════════════════════════════════════════════════════════════

/// Stateless DKSAP engine over secp256k1.
#[derive(Clone, Debug, Default)]
pub struct StealthAddressEngine {
    config: StealthConfig,
}

impl StealthAddressEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: StealthConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StealthConfig {
        &self.config
    }

    /// Sender side: the one-time public key for `receiver_public`.
    ///
    /// # Errors
    /// `MessageRequired` for an empty message unless the configuration allows it.
    #[instrument(level = "debug", skip_all, fields(nonce = nonce, message_len = message.len()))]
    pub fn derive_public_key(
        &self,
        receiver_public: &PublicKey,
        message: &[u8],
        nonce: u64,
        sender_secret: &SecretKey,
    ) -> Result<PublicKey> {
        self.config.check_message(message)?;

        let shared = shared_secret_x_hex(sender_secret, receiver_public);
        let t = stealth_tweak(&shared, message, nonce);

        let point = receiver_public.to_projective() + ProjectivePoint::GENERATOR * t;
        let one_time = PublicKey::from_affine(point.to_affine())
            .map_err(|_| CloakError::InternalError("one-time public key is the identity".into()))?;

        debug!(public_key = %encode_public_key(&one_time), "Derived one-time public key");
        Ok(one_time)
    }

    /// Receiver side: the one-time key pair.
    ///
    /// # Errors
    /// `MessageRequired` as for [`Self::derive_public_key`]; `InternalError` if
    /// `sk_receiver + t` reduces to zero.
    #[instrument(level = "debug", skip_all, fields(nonce = nonce, message_len = message.len()))]
    pub fn derive_private_key(
        &self,
        receiver_secret: &SecretKey,
        message: &[u8],
        nonce: u64,
        sender_public: &PublicKey,
    ) -> Result<KeyPair> {
        self.config.check_message(message)?;

        let shared = shared_secret_x_hex(receiver_secret, sender_public);
        let t = stealth_tweak(&shared, message, nonce);

        let scalar = *receiver_secret.to_nonzero_scalar() + t;
        let scalar = Option::<NonZeroScalar>::from(NonZeroScalar::new(scalar))
            .ok_or_else(|| CloakError::InternalError("one-time private key is zero".into()))?;

        let pair = KeyPair::from_secret(SecretKey::from(scalar));
        debug!(public_key = %pair.public_key_hex(), "Recovered one-time key pair");
        Ok(pair)
    }

    /// Checks that `candidate` is the one-time key for this receiver.
    ///
    /// Compares uncompressed encodings; a mismatch is `Ok(false)`.
    pub fn verify(
        &self,
        candidate: &PublicKey,
        receiver_secret: &SecretKey,
        message: &[u8],
        nonce: u64,
        sender_public: &PublicKey,
    ) -> Result<bool> {
        let derived = self.derive_private_key(receiver_secret, message, nonce, sender_public)?;
        let expected = uncompressed_bytes(derived.public_key());
        Ok(bool::from(expected[..].ct_eq(&uncompressed_bytes(candidate)[..])))
    }
}

impl AnonymousAddress for StealthAddressEngine {
    fn public_key(
        &self,
        receiver_public_key_hex: &str,
        message: &[u8],
        nonce: u64,
        sender_private_key_hex: &str,
    ) -> Result<String> {
        let receiver = parse_public_key(receiver_public_key_hex)?;
        let sender = parse_secret_key(sender_private_key_hex)?;
        let one_time = self.derive_public_key(&receiver, message, nonce, &sender)?;
        Ok(encode_public_key(&one_time))
    }

    fn private_key(
        &self,
        receiver_private_key_hex: &str,
        message: &[u8],
        nonce: u64,
        sender_public_key_hex: &str,
    ) -> Result<String> {
        let receiver = parse_secret_key(receiver_private_key_hex)?;
        let sender = parse_public_key(sender_public_key_hex)?;
        let pair = self.derive_private_key(&receiver, message, nonce, &sender)?;
        Ok(encode_secret_key(pair.secret_key()))
    }

    fn verify(
        &self,
        public_key_hex: &str,
        receiver_private_key_hex: &str,
        message: &[u8],
        nonce: u64,
        sender_public_key_hex: &str,
    ) -> Result<bool> {
        let candidate = parse_public_key(public_key_hex)?;
        let receiver = parse_secret_key(receiver_private_key_hex)?;
        let sender = parse_public_key(sender_public_key_hex)?;
        StealthAddressEngine::verify(self, &candidate, &receiver, message, nonce, &sender)
    }

    fn public_key_to_address(&self, public_key_hex: &str) -> Result<EthAddress> {
        public_key_to_address(public_key_hex)
    }
}
