//! # Auth Service
//!
//! Login by rich query. Credential match and the active-status gate are one
//! selector, so wrong email, wrong password and an inactive account all come
//! back as the same "wrong credentials" error.
//!
//! The decoded record's status is checked again after the query. An index
//! that lags behind the ledger can still hand back an inactive record, and
//! that case gets its own "disabled" message. This makes a disabled account
//! distinguishable from a wrong password.

use crate::codec;
use crate::config::ChaincodeConfig;
use crate::domain::entities::UserStatus;
use crate::domain::envelope::Envelope;
use crate::domain::invariants::check_login_invariants;
use crate::domain::selector::UserSelector;
use crate::errors::ChaincodeError;
use crate::ports::inbound::LoginRequest;
use crate::ports::outbound::StateStore;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Authenticates users against stored records.
pub struct AuthService<S: StateStore> {
    store: Arc<S>,
    config: Arc<ChaincodeConfig>,
}

impl<S: StateStore> AuthService<S> {
    /// Create an auth service over `store`.
    pub fn new(store: Arc<S>, config: Arc<ChaincodeConfig>) -> Self {
        Self { store, config }
    }

    /// Log in with `[email, password]`.
    ///
    /// On success the envelope carries the record's store key as `id` and the
    /// full stored record, password included, as `data`.
    #[instrument(skip_all, fields(chaincode = %self.config.name))]
    pub async fn login(&self, args: &[String]) -> Result<Envelope, ChaincodeError> {
        let request = LoginRequest::from_args(args)?;

        let selector = UserSelector::new()
            .email(request.email.as_str())
            .password(request.password)
            .status(UserStatus::Active);
        let query = codec::encode_query(&selector)?;
        if self.config.trace_payloads {
            debug!(selector = %selector, "Executing login query");
        }

        let mut results = self.store.get_query_result(&query).await?;

        // Email is unique by convention; only the first hit is considered.
        let Some(hit) = results.next() else {
            debug!(email = %request.email, "No active user matches credentials");
            return Err(ChaincodeError::InvalidCredentials);
        };
        let hit = hit?;
        let user = codec::decode_user(&hit.value)?;

        if let Err(violation) = check_login_invariants(&user) {
            warn!(key = %hit.key, %violation, "Query returned an inactive user");
            return Err(ChaincodeError::AccountDisabled);
        }

        info!(user_id = %hit.key, "User logged in");
        Ok(Envelope::login_successful(hit.key, user))
    }
}
