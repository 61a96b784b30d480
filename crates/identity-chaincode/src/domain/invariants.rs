//! # Domain Invariants
//!
//! Checks that must hold for every user record the chaincode writes or
//! returns.
//!
//! - Every persisted user record carries `doc_type == "user"`.
//! - Login never hands back a record whose status is inactive.

use crate::domain::entities::{User, USER_DOC_TYPE};
use thiserror::Error;

/// A broken record invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Record would be stored with a foreign discriminator.
    #[error("doc_type must be \"user\", found \"{found}\"")]
    WrongDocType { found: String },

    /// Inactive record about to be returned from login.
    #[error("user {id} is inactive")]
    InactiveLogin { id: String },
}

/// Record carries the user discriminator.
#[must_use]
pub fn check_doc_type_invariant(user: &User) -> bool {
    user.doc_type == USER_DOC_TYPE
}

/// Record may be returned from a successful login.
#[must_use]
pub fn check_login_status_invariant(user: &User) -> bool {
    user.status.is_active()
}

/// Check a record before it is written to the store.
pub fn check_persist_invariants(user: &User) -> Result<(), InvariantViolation> {
    if !check_doc_type_invariant(user) {
        return Err(InvariantViolation::WrongDocType {
            found: user.doc_type.clone(),
        });
    }
    Ok(())
}

/// Check a record before it is returned from login.
pub fn check_login_invariants(user: &User) -> Result<(), InvariantViolation> {
    if !check_login_status_invariant(user) {
        return Err(InvariantViolation::InactiveLogin {
            id: user.id.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserStatus;

    #[test]
    fn test_fresh_user_passes() {
        let user = User::new_active("u1", "Jane", "Doe", "pw", "jane@x.com");
        assert!(check_persist_invariants(&user).is_ok());
        assert!(check_login_invariants(&user).is_ok());
    }

    #[test]
    fn test_foreign_doc_type_rejected() {
        let mut user = User::new_active("u1", "Jane", "Doe", "pw", "jane@x.com");
        user.doc_type = "asset".into();
        assert_eq!(
            check_persist_invariants(&user),
            Err(InvariantViolation::WrongDocType {
                found: "asset".into()
            })
        );
    }

    #[test]
    fn test_inactive_login_rejected() {
        let mut user = User::new_active("u1", "Jane", "Doe", "pw", "jane@x.com");
        user.status = UserStatus::Inactive;
        assert!(!check_login_status_invariant(&user));
        assert!(check_login_invariants(&user).is_err());
    }
}
