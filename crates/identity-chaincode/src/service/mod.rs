//! # Identity Chaincode Service
//!
//! The dispatcher: maps an incoming function name and argument vector onto
//! the registry or auth service and hands back a uniform envelope.
//!
//! | Function | Handler | Success | Failures |
//! |----------|---------|---------|----------|
//! | `registerUser` | `RegistryService::register` | 1 | 422, 500 |
//! | `login` | `AuthService::login` | 1 | 422, 401 |
//! | anything else | - | - | 0 |
//!
//! Each invocation is independent; the service holds no mutable state of its
//! own between calls.

pub mod auth;
pub mod registry;

pub use auth::AuthService;
pub use registry::RegistryService;

use crate::config::ChaincodeConfig;
use crate::domain::envelope::Envelope;
use crate::errors::ChaincodeError;
use crate::ports::inbound::{ChaincodeApi, ChaincodeFunction, IdentityRegistryApi};
use crate::ports::outbound::StateStore;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Identity registry chaincode bound to a state store.
pub struct IdentityChaincode<S: StateStore> {
    config: Arc<ChaincodeConfig>,
    registry: RegistryService<S>,
    auth: AuthService<S>,
}

impl<S: StateStore> IdentityChaincode<S> {
    /// Create a chaincode over `store`.
    pub fn new(store: S, config: ChaincodeConfig) -> Self {
        Self::with_shared_store(Arc::new(store), config)
    }

    /// Create a chaincode over a store the caller keeps a handle to.
    pub fn with_shared_store(store: Arc<S>, config: ChaincodeConfig) -> Self {
        let config = Arc::new(config);
        Self {
            registry: RegistryService::new(Arc::clone(&store), Arc::clone(&config)),
            auth: AuthService::new(store, Arc::clone(&config)),
            config,
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ChaincodeConfig {
        &self.config
    }
}

#[async_trait]
impl<S: StateStore> ChaincodeApi for IdentityChaincode<S> {
    async fn init(&self) -> Result<(), ChaincodeError> {
        info!(chaincode = %self.config.name, "Chaincode initialized");
        Ok(())
    }

    #[instrument(
        skip(self, args),
        fields(
            chaincode = %self.config.name,
            invocation_id = %Uuid::new_v4(),
            arg_count = args.len()
        )
    )]
    async fn try_invoke(
        &self,
        function: &str,
        args: &[String],
    ) -> Result<Envelope, ChaincodeError> {
        let Some(routed) = ChaincodeFunction::parse(function) else {
            warn!("Invalid function name");
            return Err(ChaincodeError::UnknownFunction(function.to_string()));
        };
        debug!(operation = routed.operation().name(), "Dispatching");

        let result = match routed {
            ChaincodeFunction::RegisterUser => self.registry.register(args).await,
            ChaincodeFunction::Login => self.auth.login(args).await,
        };

        if let Err(err) = &result {
            debug!(status = err.status_code(), error = %err, "Invocation failed");
        }
        result
    }
}

#[async_trait]
impl<S: StateStore> IdentityRegistryApi for IdentityChaincode<S> {
    async fn register_user(&self, args: &[String]) -> Result<Envelope, ChaincodeError> {
        self.registry.register(args).await
    }

    async fn login(&self, args: &[String]) -> Result<Envelope, ChaincodeError> {
        self.auth.login(args).await
    }

    async fn check_email(&self, args: &[String]) -> Result<Envelope, ChaincodeError> {
        self.registry.check_email(args).await
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStateStore;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn chaincode() -> (Arc<InMemoryStateStore>, IdentityChaincode<InMemoryStateStore>) {
        let store = Arc::new(InMemoryStateStore::new());
        let cc =
            IdentityChaincode::with_shared_store(Arc::clone(&store), ChaincodeConfig::default());
        (store, cc)
    }

    #[tokio::test]
    async fn test_init_always_succeeds() {
        let (_, cc) = chaincode();
        assert!(cc.init().await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_function_envelope() {
        let (store, cc) = chaincode();
        let envelope = cc.invoke("deleteUser", &args(&["u1"])).await;
        assert_eq!(envelope.status, 0);
        assert_eq!(envelope.message, "Invalid function name = deleteUser");
        assert_eq!(store.operation_count(), 0);
    }

    #[tokio::test]
    async fn test_check_email_is_not_routed() {
        let (_, cc) = chaincode();
        let envelope = cc.invoke("CheckEmail", &args(&["a@x.com"])).await;
        assert_eq!(envelope.status, 0);

        let direct = IdentityRegistryApi::check_email(&cc, &args(&["a@x.com"]))
            .await
            .unwrap();
        assert!(direct.is_success());
    }

    #[tokio::test]
    async fn test_routes_register_then_login() {
        let (_, cc) = chaincode();

        let created = cc
            .invoke("registerUser", &args(&["u1", "Jane", "Doe", "pw123", "jane@x.com"]))
            .await;
        assert!(created.is_success());

        let logged_in = cc.invoke("login", &args(&["jane@x.com", "pw123"])).await;
        assert!(logged_in.is_success());
        assert_eq!(logged_in.id.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn test_arity_errors_become_envelopes() {
        let (store, cc) = chaincode();
        let register = cc.invoke("registerUser", &args(&["u1"])).await;
        let login = cc.invoke("login", &[]).await;
        assert_eq!(register.status, 422);
        assert_eq!(login.status, 422);
        assert_eq!(store.operation_count(), 0);
    }
}
