//! # Identity Chaincode - User Registry on a Ledger State Store
//!
//! ## Purpose
//!
//! Registers user accounts and authenticates logins as a transaction
//! handler. The peer calls `init` once and `invoke(function, args)` per
//! transaction; all state lives in the ledger's key-value store, queried
//! through its rich-query (selector) index.
//!
//! ## Functions
//!
//! | Function | Arguments | Success | Failures |
//! |----------|-----------|---------|----------|
//! | `registerUser` | id, firstName, lastName, password, email | 1 | 422, 500 |
//! | `login` | email, password | 1 | 422, 401 |
//! | unknown | - | - | 0 |
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Every user record has `doc_type == "user"` | `codec::encode_user` via `domain/invariants.rs` |
//! | Nothing is written unless encoding succeeded | `service/registry.rs` |
//! | Login never returns an inactive record | `service/auth.rs` via `domain/invariants.rs` |
//! | Arity is checked before any store access | `ports/inbound.rs` request parsing |
//!
//! ## Known Limitations
//!
//! - Passwords are stored and returned in plaintext.
//! - Email uniqueness is check-then-write; concurrent registrations with the
//!   same email can both succeed.
//! - A duplicate email is reported with status 500.
//! - Ids are not checked for uniqueness unless `enforce_unique_id` is set;
//!   the store overwrites silently.
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Dispatcher | `service/mod.rs` | Function routing |
//! | Registry | `service/registry.rs` | Registration, email probe |
//! | Auth | `service/auth.rs` | Login |
//! | Codec | `codec.rs` | Record / query / envelope JSON |
//! | Store port | `ports/outbound.rs` | `StateStore` contract |
//! | Shim | `adapters/shim.rs` | Peer request/response mapping |
//!
//! ## Usage Example
//!
//! ```
//! use identity_chaincode::prelude::*;
//!
//! # tokio_test_block(async {
//! let cc = IdentityChaincode::new(InMemoryStateStore::new(), ChaincodeConfig::default());
//!
//! let args: Vec<String> = ["u1", "Jane", "Doe", "pw123", "jane@x.com"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let envelope = cc.invoke("registerUser", &args).await;
//! assert_eq!(envelope.status, 1);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f);
//! # }
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod codec;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::entities::{EmailConfirmation, User, UserStatus, UserSummary};
    pub use crate::domain::envelope::{Envelope, ResponseData, STATUS_SUCCESS};
    pub use crate::domain::selector::UserSelector;

    // Ports
    pub use crate::ports::inbound::{ChaincodeApi, ChaincodeFunction, IdentityRegistryApi};
    pub use crate::ports::outbound::{KeyValue, StateQueryIterator, StateStore};

    // Errors
    pub use crate::errors::{ChaincodeError, CodecError, ErrorKind, Operation, StoreError};

    // Configuration
    pub use crate::config::{ChaincodeConfig, ConfigError};

    // Adapters
    pub use crate::adapters::{InMemoryStateStore, PeerResponse, ShimHandler};

    // Service
    pub use crate::service::{AuthService, IdentityChaincode, RegistryService};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
