//! # Adapters Layer (Outer Hexagon)
//!
//! Adapters connect the identity chaincode to its host.
//!
//! - `memory_store`: in-memory `StateStore` with selector queries
//! - `shim`: peer-facing request/response translation

pub mod memory_store;
pub mod shim;

pub use memory_store::*;
pub use shim::*;
