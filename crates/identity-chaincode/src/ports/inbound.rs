//! # Driving Ports (API - Inbound)
//!
//! What the transaction host calls: `init` once and `invoke` per
//! transaction, with a function name and positional string arguments.
//!
//! Argument parsing lives here so every handler sees typed requests and the
//! arity check always runs before any store access.

use crate::domain::envelope::Envelope;
use crate::errors::{ChaincodeError, Operation};
use async_trait::async_trait;

// =============================================================================
// ROUTED FUNCTIONS
// =============================================================================

/// Functions the dispatcher routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChaincodeFunction {
    /// `registerUser`
    RegisterUser,
    /// `login`
    Login,
}

impl ChaincodeFunction {
    /// Resolve a submitted function name. Matching is case-sensitive.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "registerUser" => Some(Self::RegisterUser),
            "login" => Some(Self::Login),
            _ => None,
        }
    }

    /// Operation backing this function.
    #[must_use]
    pub fn operation(self) -> Operation {
        match self {
            Self::RegisterUser => Operation::RegisterUser,
            Self::Login => Operation::Login,
        }
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// `registerUser` arguments: `[id, firstName, lastName, password, email]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterUserRequest {
    /// Store key for the new record.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Password, stored as given.
    pub password: String,
    /// Email, checked for uniqueness.
    pub email: String,
}

impl RegisterUserRequest {
    /// Parse positional arguments.
    pub fn from_args(args: &[String]) -> Result<Self, ChaincodeError> {
        match args {
            [id, first_name, last_name, password, email] => Ok(Self {
                id: id.clone(),
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                password: password.clone(),
                email: email.clone(),
            }),
            _ => Err(ChaincodeError::arity(Operation::RegisterUser, args.len())),
        }
    }
}

/// `login` arguments: `[email, password]`.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Submitted password.
    pub password: String,
}

impl LoginRequest {
    /// Parse positional arguments.
    pub fn from_args(args: &[String]) -> Result<Self, ChaincodeError> {
        match args {
            [email, password] => Ok(Self {
                email: email.clone(),
                password: password.clone(),
            }),
            _ => Err(ChaincodeError::arity(Operation::Login, args.len())),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// `CheckEmail` arguments: `[email]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckEmailRequest {
    /// Email to probe.
    pub email: String,
}

impl CheckEmailRequest {
    /// Parse positional arguments.
    pub fn from_args(args: &[String]) -> Result<Self, ChaincodeError> {
        match args {
            [email] => Ok(Self {
                email: email.clone(),
            }),
            _ => Err(ChaincodeError::arity(Operation::CheckEmail, args.len())),
        }
    }
}

// =============================================================================
// API TRAITS
// =============================================================================

/// Identity operations, callable without going through the dispatcher.
#[async_trait]
pub trait IdentityRegistryApi: Send + Sync {
    /// Create a user after checking the email is unused.
    ///
    /// Exactly one store write on success, none on any failure.
    async fn register_user(&self, args: &[String]) -> Result<Envelope, ChaincodeError>;

    /// Authenticate an active user by email and password. Read-only.
    async fn login(&self, args: &[String]) -> Result<Envelope, ChaincodeError>;

    /// Probe whether an email is already registered. Read-only.
    async fn check_email(&self, args: &[String]) -> Result<Envelope, ChaincodeError>;
}

/// Invocation contract exposed to the transaction host.
#[async_trait]
pub trait ChaincodeApi: Send + Sync {
    /// Instantiate the chaincode. Carries no setup state.
    async fn init(&self) -> Result<(), ChaincodeError>;

    /// Route `function` and run it, keeping the error value.
    async fn try_invoke(&self, function: &str, args: &[String])
        -> Result<Envelope, ChaincodeError>;

    /// Route `function` and run it; every failure becomes an error envelope.
    async fn invoke(&self, function: &str, args: &[String]) -> Envelope {
        match self.try_invoke(function, args).await {
            Ok(envelope) => envelope,
            Err(err) => Envelope::from_error(&err),
        }
    }
}
