//! Core value types for CLOAK.

mod address;
mod config;
mod curve;
pub mod encoding;

pub use address::*;
pub use config::*;
pub use curve::*;
