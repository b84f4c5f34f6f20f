//! # CLOAK Stealth Addresses
//!
//! Dual-key stealth address protocol (DKSAP) over secp256k1.
//!
//! This crate provides:
//!
//! - **Derivation**: sender-side one-time public keys, receiver-side one-time key pairs
//! - **Verification**: checking a one-time key against the receiver's view
//! - **Addresses**: mapping public keys to checksummed account identifiers
//! - **Keys**: long-term and ephemeral key pair generation
//!
//! ## Quick Start
//!
//! ```rust
//! use cloak_stealth::{KeyPair, StealthAddressEngine};
//!
//! let sender = KeyPair::generate();
//! let receiver = KeyPair::generate();
//! let engine = StealthAddressEngine::default();
//!
//! // Sender: one-time key for the receiver
//! let one_time = engine
//!     .derive_public_key(receiver.public_key(), b"tx", 0, sender.secret_key())
//!     .unwrap();
//!
//! // Receiver: the matching private key
//! let pair = engine
//!     .derive_private_key(receiver.secret_key(), b"tx", 0, sender.public_key())
//!     .unwrap();
//! assert_eq!(pair.public_key(), &one_time);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod address;
pub mod dksap;
pub mod keys;

pub use address::{address_from_public_key, public_key_to_address};
pub use dksap::{stealth_tweak, StealthAddressEngine};
pub use keys::KeyPair;
