//! # Error Types
//!
//! All error types for the identity chaincode, plus the single table that maps
//! an error kind to the status code clients see in the response envelope.

use crate::domain::invariants::InvariantViolation;
use thiserror::Error;

// =============================================================================
// OPERATIONS
// =============================================================================

/// Chaincode operations that take positional arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// `registerUser(id, firstName, lastName, password, email)`.
    RegisterUser,
    /// `login(email, password)`.
    Login,
    /// `CheckEmail(email)`.
    CheckEmail,
}

impl Operation {
    /// Function name as submitted by clients.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::RegisterUser => "registerUser",
            Self::Login => "login",
            Self::CheckEmail => "CheckEmail",
        }
    }

    /// Exact number of positional arguments the operation accepts.
    #[must_use]
    pub fn expected_args(self) -> usize {
        match self {
            Self::RegisterUser => 5,
            Self::Login => 2,
            Self::CheckEmail => 1,
        }
    }

    /// Message returned when the argument count is wrong.
    ///
    /// The wording differs per operation; clients already match on it.
    #[must_use]
    pub fn arity_message(self) -> &'static str {
        match self {
            Self::RegisterUser => "Invalid number of arguments. Expected 5",
            Self::Login => "Incorrect number of arguments. Expected 2 arguments",
            Self::CheckEmail => "Invalid number of arguments. Expected 1 argument.",
        }
    }
}

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors reported by the state store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend could not be reached.
    #[error("state store unavailable: {0}")]
    Unavailable(String),

    /// Write rejected by the backend (conflict, endorsement failure, ...).
    #[error("failed to put state for key {key}: {reason}")]
    PutFailed { key: String, reason: String },

    /// Selector could not be parsed or executed.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Iterating query results failed part way.
    #[error("query iteration failed: {0}")]
    Iteration(String),

    /// In-memory store lock was poisoned by a panicking writer.
    #[error("state store lock poisoned")]
    LockPoisoned,
}

// =============================================================================
// CODEC ERRORS
// =============================================================================

/// Errors raised while encoding or decoding records.
#[derive(Debug, Error)]
pub enum CodecError {
    /// JSON (de)serialization failed; the serde message is surfaced verbatim.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Record violates a domain invariant and must not be persisted.
    #[error("refusing to encode record: {0}")]
    Invariant(#[from] InvariantViolation),
}

// =============================================================================
// CHAINCODE ERRORS
// =============================================================================

/// Coarse error classification used for status mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong number of positional arguments.
    InvalidArguments,
    /// Uniqueness check failed.
    Validation,
    /// Credentials rejected or account disabled.
    Authentication,
    /// Serialization failed.
    Encoding,
    /// State store failed.
    Store,
    /// Unknown function name.
    Routing,
    /// Failure without a client-facing code of its own.
    Generic,
}

impl ErrorKind {
    /// Status code placed in the response envelope for this kind.
    #[must_use]
    pub fn status_code(self) -> i32 {
        match self {
            Self::InvalidArguments => 422,
            // Clients shipped against 500 for duplicate email; a 4xx would be correct.
            Self::Validation => 500,
            Self::Authentication => 401,
            Self::Encoding | Self::Store | Self::Generic => 500,
            Self::Routing => 0,
        }
    }
}

/// Every failure an invocation can produce.
#[derive(Debug, Error)]
pub enum ChaincodeError {
    /// Argument count does not match the operation.
    #[error("{}", .operation.arity_message())]
    InvalidArgumentCount { operation: Operation, actual: usize },

    /// Another user record already uses this email.
    #[error("The email you have entered already exist.")]
    EmailAlreadyExists { email: String },

    /// A record is already stored under this id (only with unique-id enforcement).
    #[error("The user id you have entered already exist.")]
    IdAlreadyExists { id: String },

    /// No active record matches the email and password.
    #[error("The email or password you have entered is wrong.")]
    InvalidCredentials,

    /// Matching record is marked inactive.
    #[error("You have been disabled by admin.")]
    AccountDisabled,

    /// Record or envelope (de)serialization failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// State store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Function name not routed by the dispatcher.
    #[error("Invalid function name = {0}")]
    UnknownFunction(String),
}

impl ChaincodeError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            // The email probe reports arity like any other internal failure.
            Self::InvalidArgumentCount {
                operation: Operation::CheckEmail,
                ..
            } => ErrorKind::Generic,
            Self::InvalidArgumentCount { .. } => ErrorKind::InvalidArguments,
            Self::EmailAlreadyExists { .. } | Self::IdAlreadyExists { .. } => {
                ErrorKind::Validation
            }
            Self::InvalidCredentials | Self::AccountDisabled => ErrorKind::Authentication,
            Self::Codec(_) => ErrorKind::Encoding,
            Self::Store(_) => ErrorKind::Store,
            Self::UnknownFunction(_) => ErrorKind::Routing,
        }
    }

    /// Envelope status code for this error.
    #[must_use]
    pub fn status_code(&self) -> i32 {
        self.kind().status_code()
    }

    /// Returns true if the host transaction must fail rather than return an envelope.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::Encoding | ErrorKind::Store)
    }

    /// Shorthand for an arity failure.
    #[must_use]
    pub fn arity(operation: Operation, actual: usize) -> Self {
        Self::InvalidArgumentCount { operation, actual }
    }
}

// =============================================================================
// TESTS
// =============================================================================
