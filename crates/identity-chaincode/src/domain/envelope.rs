//! # Response Envelope
//!
//! Uniform `{status, message, data}` shape returned by every operation,
//! success or failure. Clients must look at `status` to tell them apart.

use crate::domain::entities::{EmailConfirmation, User, UserSummary};
use crate::errors::ChaincodeError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Envelope status of every successful operation.
pub const STATUS_SUCCESS: i32 = 1;

/// Success messages.
pub mod messages {
    /// Registration succeeded.
    pub const USER_CREATED: &str = "User created successfully";
    /// Login succeeded.
    pub const LOGIN_SUCCESSFUL: &str = "User login successful";
    /// Email is not taken.
    pub const EMAIL_AVAILABLE: &str = "The email you have entered is a valid email.";
}

/// Payload carried in `data`, one variant per call path.
///
/// Serialized untagged. Decoding picks the variant from the keys present
/// and never falls back to a narrower one: an object carrying any
/// full-record field must decode as a full [`User`] or fail.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// `null`; all error envelopes.
    #[default]
    None,
    /// Full stored record; login.
    UserFull(User),
    /// Reduced projection; registration.
    UserSummary(UserSummary),
    /// Email availability; `CheckEmail`.
    Confirmation(EmailConfirmation),
}

/// Keys only a full stored record carries.
const FULL_RECORD_KEYS: [&str; 4] = ["password", "doc_type", "status", "ID"];

/// Keys of the registration projection besides `email`.
const SUMMARY_KEYS: [&str; 3] = ["user_id", "first_name", "last_name"];

impl<'de> Deserialize<'de> for ResponseData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let (full, summary) = match &value {
            Value::Null => return Ok(Self::None),
            Value::Object(map) => (
                FULL_RECORD_KEYS.iter().any(|key| map.contains_key(*key)),
                SUMMARY_KEYS.iter().any(|key| map.contains_key(*key)),
            ),
            other => {
                return Err(D::Error::custom(format!(
                    "response data must be an object or null, found {other}"
                )));
            }
        };

        let data = if full {
            Self::UserFull(serde_json::from_value(value).map_err(D::Error::custom)?)
        } else if summary {
            Self::UserSummary(serde_json::from_value(value).map_err(D::Error::custom)?)
        } else {
            Self::Confirmation(serde_json::from_value(value).map_err(D::Error::custom)?)
        };
        Ok(data)
    }
}

/// Response envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// `1` on success, an error status otherwise.
    pub status: i32,
    /// Human readable outcome.
    pub message: String,
    /// Store key of the logged-in record; login success only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Call-path specific payload.
    #[serde(default)]
    pub data: ResponseData,
}

impl Envelope {
    /// Successful registration.
    #[must_use]
    pub fn user_created(summary: UserSummary) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: messages::USER_CREATED.to_string(),
            id: None,
            data: ResponseData::UserSummary(summary),
        }
    }

    /// Successful login. `key` is the store key the record was found under.
    #[must_use]
    pub fn login_successful(key: impl Into<String>, user: User) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: messages::LOGIN_SUCCESSFUL.to_string(),
            id: Some(key.into()),
            data: ResponseData::UserFull(user),
        }
    }

    /// Email is free to register.
    #[must_use]
    pub fn email_available(email: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: messages::EMAIL_AVAILABLE.to_string(),
            id: None,
            data: ResponseData::Confirmation(EmailConfirmation {
                email: email.into(),
            }),
        }
    }

    /// Error envelope with the status from the error table and no data.
    #[must_use]
    pub fn from_error(err: &ChaincodeError) -> Self {
        Self {
            status: err.status_code(),
            message: err.to_string(),
            id: None,
            data: ResponseData::None,
        }
    }

    /// Returns true for a success envelope.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}
