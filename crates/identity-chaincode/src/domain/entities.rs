//! # Core Domain Entities
//!
//! The user record stored in the ledger and the projections handed back to
//! clients.
//!
//! Passwords are stored exactly as submitted. This is a known defect of the
//! record format: there is no hashing step anywhere in the chaincode, and the
//! login response returns the stored password to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator stored on every user record.
///
/// Other entity kinds share the same keyspace and rich-query index.
pub const USER_DOC_TYPE: &str = "user";

// =============================================================================
// USER STATUS
// =============================================================================

/// Account status. Encoded on the wire as `0` / `1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum UserStatus {
    /// Login is refused.
    Inactive,
    /// Login is allowed.
    #[default]
    Active,
}

impl UserStatus {
    /// Returns true if the account may log in.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<UserStatus> for u8 {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Inactive => 0,
            UserStatus::Active => 1,
        }
    }
}

impl TryFrom<u8> for UserStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inactive),
            1 => Ok(Self::Active),
            other => Err(format!("invalid user status: {other}")),
        }
    }
}

// =============================================================================
// USER
// =============================================================================

/// Identity record persisted under its caller-supplied id.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Primary key. Older records carry it under `ID`.
    #[serde(rename = "user_id", alias = "ID")]
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Plaintext password.
    pub password: String,
    /// Always [`USER_DOC_TYPE`].
    pub doc_type: String,
    /// Login name, unique by convention.
    pub email: String,
    /// Active / inactive flag.
    pub status: UserStatus,
}

impl User {
    /// Create a fresh, active user record.
    #[must_use]
    pub fn new_active(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            password: password.into(),
            doc_type: USER_DOC_TYPE.to_string(),
            email: email.into(),
            status: UserStatus::Active,
        }
    }

    /// Reduced projection returned after registration.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

// Hand-written so the password never reaches a log line.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"***")
            .field("doc_type", &self.doc_type)
            .field("email", &self.email)
            .field("status", &self.status)
            .finish()
    }
}

// =============================================================================
// PROJECTIONS
// =============================================================================

/// Public view of a freshly registered user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Record key.
    #[serde(rename = "user_id")]
    pub id: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Payload of a successful email availability check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfirmation {
    /// The email that is free to register.
    pub email: String,
}

// =============================================================================
// TESTS
// =============================================================================
