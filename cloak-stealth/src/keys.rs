//! secp256k1 key pairs.
//!
//! Used for long-term receiver keys, ephemeral sender keys, and the
//! one-time keys a receiver recovers. The private half is a
//! [`k256::SecretKey`], which clears itself on drop; hex exports of it are
//! wrapped in [`Zeroizing`].

use k256::{NonZeroScalar, PublicKey, SecretKey};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use cloak_core::error::Result;
use cloak_core::types::EthAddress;
use cloak_crypto::secp256k1::{encode_public_key, encode_secret_key, parse_secret_key};

use crate::address::address_from_public_key;

/// A secp256k1 key pair with `public = G · secret`.
#[derive(Clone)]
pub struct KeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generates a key pair from OS entropy.
    pub fn generate() -> Self {
        Self::generate_with(&mut OsRng)
    }

    /// Generates a key pair from the given RNG.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self::from_secret(SecretKey::from(NonZeroScalar::random(rng)))
    }

    /// Builds the pair for an existing private key.
    pub fn from_secret(secret: SecretKey) -> Self {
        let public = secret.public_key();
        Self { secret, public }
    }

    /// Parses a private key from hex and derives its public key.
    pub fn from_secret_hex(hex: &str) -> Result<Self> {
        Ok(Self::from_secret(parse_secret_key(hex)?))
    }

    /// The private key.
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    /// The public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Private key as 64 lowercase hex characters.
    pub fn secret_key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(encode_secret_key(&self.secret))
    }

    /// Public key as uncompressed SEC1 hex, without prefix.
    pub fn public_key_hex(&self) -> String {
        encode_public_key(&self.public)
    }

    /// Account identifier of the public key.
    pub fn address(&self) -> EthAddress {
        address_from_public_key(&self.public)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public_key_hex())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
