//! # CLOAK Cryptography
//!
//! Curve backends and hash primitives for the CLOAK protocol.
//!
//! This crate provides:
//!
//! - **Group**: the [`CurveGroup`] capability interface both backends share
//! - **secp256k1**: key codecs, Diffie-Hellman, and the Weierstrass backend
//! - **Baby Jubjub**: the twisted-Edwards backend and its one-time parameter load
//! - **Hash**: SHA-256 hex digests and Keccak256
//! - **Poseidon**: field-native transfer digests
//!
//! ## Example
//!
//! ```rust,ignore
//! use cloak_crypto::{BabyJubjub, CurveGroup, Secp256k1};
//!
//! let secp = Secp256k1;
//! let g = secp.generator();
//!
//! let jubjub = BabyJubjub::load().await?;
//! let packed = jubjub.encode(&jubjub.generator());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod babyjubjub;
pub mod group;
pub mod hash;
pub mod poseidon;
pub mod secp256k1;
pub mod value;

// Re-export main types at crate root
pub use babyjubjub::{BabyJubjub, BabyJubjubCell, EdwardsPoint, JubjubScalar};
pub use group::CurveGroup;
pub use hash::{keccak256, sha256, sha256_hex};
pub use poseidon::transfer_message;
pub use secp256k1::{Secp256k1, WeierstrassPoint};
pub use value::CommitValue;
