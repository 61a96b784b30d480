//! # Query Selectors
//!
//! Typed builder for rich-query selectors over user records. Each predicate is
//! an equality match on one record field; unset predicates are left out of the
//! compiled query.

use crate::domain::entities::UserStatus;
use serde::Serialize;
use std::fmt;

/// Equality predicates over user record fields.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<UserStatus>,
}

impl UserSelector {
    /// Selector with no predicates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Match on email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Match on stored password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Match on account status.
    #[must_use]
    pub fn status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Wrap in the `{"selector": ...}` envelope the query engine expects.
    #[must_use]
    pub fn into_query(self) -> QuerySelector<Self> {
        QuerySelector { selector: self }
    }
}

/// Log-safe rendering: the password predicate is masked.
impl fmt::Display for UserSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(email) = &self.email {
            parts.push(format!("email={email}"));
        }
        if self.password.is_some() {
            parts.push("password=***".to_string());
        }
        if let Some(status) = self.status {
            parts.push(format!("status={}", u8::from(status)));
        }
        write!(f, "{{{}}}", parts.join(", "))
    }
}

impl fmt::Debug for UserSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserSelector{self}")
    }
}

/// Top-level rich-query document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuerySelector<T: Serialize> {
    /// Field predicates.
    pub selector: T,
}
