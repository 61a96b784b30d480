//! # Domain Layer (Inner Hexagon)
//!
//! Pure identity-registry concepts: the user record, query selectors, the
//! response envelope and the invariants over them.
//! NO I/O, NO async.

pub mod entities;
pub mod envelope;
pub mod invariants;
pub mod selector;

pub use entities::*;
pub use envelope::*;
pub use invariants::*;
pub use selector::*;
