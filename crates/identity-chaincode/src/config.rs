//! # Chaincode Configuration
//!
//! Runtime switches for the identity chaincode. All fields have defaults
//! matching the deployed behaviour and can be overridden from the
//! environment.

use thiserror::Error;

/// Environment variable for [`ChaincodeConfig::name`].
pub const ENV_NAME: &str = "IDENTITY_CC_NAME";
/// Environment variable for [`ChaincodeConfig::enforce_unique_id`].
pub const ENV_ENFORCE_UNIQUE_ID: &str = "IDENTITY_CC_ENFORCE_UNIQUE_ID";
/// Environment variable for [`ChaincodeConfig::trace_payloads`].
pub const ENV_TRACE_PAYLOADS: &str = "IDENTITY_CC_TRACE_PAYLOADS";

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A boolean variable held something other than true/false.
    #[error("{var} must be a boolean (true/false/1/0/yes/no), got {value:?}")]
    InvalidBool { var: &'static str, value: String },

    /// Chaincode name was set but blank.
    #[error("{0} must not be empty")]
    EmptyName(&'static str),
}

/// Identity chaincode configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaincodeConfig {
    /// Chaincode name recorded on log spans.
    pub name: String,
    /// Reject registrations whose id already has a record.
    ///
    /// Off by default: the store overwrites silently and only email
    /// uniqueness is checked.
    pub enforce_unique_id: bool,
    /// Log redacted records and selectors at debug level.
    pub trace_payloads: bool,
}

impl Default for ChaincodeConfig {
    fn default() -> Self {
        Self {
            name: "identity".to_string(),
            enforce_unique_id: false,
            trace_payloads: false,
        }
    }
}

impl ChaincodeConfig {
    /// Build from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(ENV_NAME) {
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::EmptyName(ENV_NAME));
            }
            config.name = name.to_string();
        }
        if let Some(value) = lookup(ENV_ENFORCE_UNIQUE_ID) {
            config.enforce_unique_id = parse_bool(ENV_ENFORCE_UNIQUE_ID, &value)?;
        }
        if let Some(value) = lookup(ENV_TRACE_PAYLOADS) {
            config.trace_payloads = parse_bool(ENV_TRACE_PAYLOADS, &value)?;
        }

        Ok(config)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}
