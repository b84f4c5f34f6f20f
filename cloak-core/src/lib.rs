//! # CLOAK Core
//!
//! Core types, errors, configuration and traits shared by the CLOAK
//! privacy primitives: the dual-key stealth address protocol and Pedersen
//! commitments.
//!
//! - **Errors**: the fixed error taxonomy every engine reports through
//! - **Constants**: encoding sizes and protocol version
//! - **Types**: account identifiers, curve identifiers, configuration
//! - **Traits**: the string-level anonymous-address interface
//!
//! ## Example
//!
//! ```rust
//! use cloak_core::{CurveKind, SessionParams};
//!
//! let params = SessionParams::new(CurveKind::Secp256k1, "04...".into());
//! let json = params.to_json().unwrap();
//! assert!(json.contains("secp256k1"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{CloakError, Result};
pub use traits::*;
pub use types::*;
