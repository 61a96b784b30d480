//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the identity services and the outside world.
//!
//! - **Driving Ports (Inbound)**: `ChaincodeApi`, `IdentityRegistryApi`
//! - **Driven Ports (Outbound)**: `StateStore`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
