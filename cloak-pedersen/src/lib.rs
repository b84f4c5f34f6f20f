//! # CLOAK Pedersen Commitments
//!
//! Additively homomorphic commitments `C = G·r + H·v` over either curve
//! backend, for checking balance invariants without revealing amounts.
//!
//! This crate provides:
//!
//! - **Commit**: blinded commitments to 256-bit values
//! - **Combine**: geometric (`add`/`sub`) and algebraic
//!   (`add_commitment`/`sub_commitment`) homomorphic combination
//! - **Verify**: opening checks
//! - **Sessions**: exporting and importing the shared secondary generator `H`
//!
//! ## Example
//!
//! ```rust
//! use cloak_crypto::{CommitValue, CurveGroup};
//! use cloak_pedersen::PedersenEngine;
//!
//! let engine = PedersenEngine::secp256k1();
//! let h = engine.generate_secondary_generator();
//!
//! let r_in = engine.generate_random_scalar();
//! let r_out = engine.generate_random_scalar();
//! let input = engine.commit_to(&h, &r_in, &CommitValue::from(100u64));
//! let output = engine.commit_to(&h, &r_out, &CommitValue::from(60u64));
//!
//! // The change commitment opens to 40
//! let change = engine.sub(&input, &output);
//! let r_change = engine.group().scalar_sub(&r_in, &r_out);
//! assert!(engine.verify(&h, &change, &r_change, &CommitValue::from(40u64)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod engine;

pub use engine::{Commitment, PedersenEngine, SecondaryGenerator};
