//! # Registry Service
//!
//! User registration and the email existence probe.
//!
//! The uniqueness check is read-then-write with no conditional put in the
//! store contract: two registrations racing on the same email can both pass
//! the probe before either commits. Ordering of commits is left to the host.

use crate::codec;
use crate::config::ChaincodeConfig;
use crate::domain::entities::User;
use crate::domain::envelope::Envelope;
use crate::domain::selector::UserSelector;
use crate::errors::ChaincodeError;
use crate::ports::inbound::{CheckEmailRequest, RegisterUserRequest};
use crate::ports::outbound::StateStore;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Registers users and probes email availability.
pub struct RegistryService<S: StateStore> {
    store: Arc<S>,
    config: Arc<ChaincodeConfig>,
}

impl<S: StateStore> RegistryService<S> {
    /// Create a registry service over `store`.
    pub fn new(store: Arc<S>, config: Arc<ChaincodeConfig>) -> Self {
        Self { store, config }
    }

    /// Register a user from `[id, firstName, lastName, password, email]`.
    #[instrument(skip_all, fields(chaincode = %self.config.name))]
    pub async fn register(&self, args: &[String]) -> Result<Envelope, ChaincodeError> {
        let request = RegisterUserRequest::from_args(args)?;

        self.check_email(std::slice::from_ref(&request.email)).await?;
        if self.config.enforce_unique_id {
            self.ensure_id_unused(&request.id).await?;
        }

        let user = User::new_active(
            request.id,
            request.first_name,
            request.last_name,
            request.password,
            request.email,
        );
        let bytes = codec::encode_user(&user)?;
        if self.config.trace_payloads {
            debug!(record = ?user, "Persisting user record");
        }

        self.store.put_state(&user.id, bytes).await?;

        info!(user_id = %user.id, "User created");
        Ok(Envelope::user_created(user.summary()))
    }

    /// Check that no user record uses the given email.
    ///
    /// A taken email is an error outcome; a free one yields a confirmation
    /// envelope.
    #[instrument(skip_all, fields(chaincode = %self.config.name))]
    pub async fn check_email(&self, args: &[String]) -> Result<Envelope, ChaincodeError> {
        let request = CheckEmailRequest::from_args(args)?;

        let query = codec::encode_query(&UserSelector::new().email(request.email.as_str()))?;
        let mut results = self.store.get_query_result(&query).await?;

        match results.next() {
            Some(Ok(_)) => {
                debug!(email = %request.email, "Email already registered");
                Err(ChaincodeError::EmailAlreadyExists {
                    email: request.email,
                })
            }
            Some(Err(err)) => Err(err.into()),
            None => Ok(Envelope::email_available(request.email)),
        }
    }

    async fn ensure_id_unused(&self, id: &str) -> Result<(), ChaincodeError> {
        if self.store.get_state(id).await?.is_some() {
            debug!(user_id = %id, "User id already registered");
            return Err(ChaincodeError::IdAlreadyExists { id: id.to_string() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStateStore;
    use crate::domain::entities::{UserStatus, USER_DOC_TYPE};
    use crate::domain::envelope::ResponseData;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn service(
        config: ChaincodeConfig,
    ) -> (Arc<InMemoryStateStore>, RegistryService<InMemoryStateStore>) {
        let store = Arc::new(InMemoryStateStore::new());
        let service = RegistryService::new(Arc::clone(&store), Arc::new(config));
        (store, service)
    }

    #[tokio::test]
    async fn test_register_persists_active_user() {
        let (store, registry) = service(ChaincodeConfig::default());

        let envelope = registry
            .register(&args(&["u1", "Jane", "Doe", "pw123", "jane@x.com"]))
            .await
            .unwrap();

        assert!(envelope.is_success());
        assert_eq!(envelope.message, "User created successfully");
        assert_eq!(store.write_count(), 1);

        let user = codec::decode_user(&store.raw("u1").unwrap().unwrap()).unwrap();
        assert_eq!(user.doc_type, USER_DOC_TYPE);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.password, "pw123");
        assert!(matches!(envelope.data, ResponseData::UserSummary(ref s) if s.id == "u1"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_writes_nothing() {
        let (store, registry) = service(ChaincodeConfig::default());
        registry
            .register(&args(&["u1", "Jane", "Doe", "pw123", "jane@x.com"]))
            .await
            .unwrap();

        let err = registry
            .register(&args(&["u2", "John", "Roe", "pw456", "jane@x.com"]))
            .await
            .unwrap_err();

        assert!(matches!(err, ChaincodeError::EmailAlreadyExists { .. }));
        assert_eq!(err.status_code(), 500);
        assert_eq!(store.write_count(), 1);
        assert!(store.raw("u2").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_register_wrong_arity_touches_nothing() {
        let (store, registry) = service(ChaincodeConfig::default());
        let err = registry.register(&args(&["u1", "Jane"])).await.unwrap_err();
        assert_eq!(err.status_code(), 422);
        assert_eq!(store.operation_count(), 0);
    }

    #[tokio::test]
    async fn test_same_id_new_email_overwrites() {
        let (store, registry) = service(ChaincodeConfig::default());
        registry
            .register(&args(&["u1", "Jane", "Doe", "pw", "first@x.com"]))
            .await
            .unwrap();
        registry
            .register(&args(&["u1", "Jane", "Doe", "pw", "second@x.com"]))
            .await
            .unwrap();

        assert_eq!(store.len().unwrap(), 1);
        let user = codec::decode_user(&store.raw("u1").unwrap().unwrap()).unwrap();
        assert_eq!(user.email, "second@x.com");
    }

    #[tokio::test]
    async fn test_unique_id_enforcement() {
        let (store, registry) = service(ChaincodeConfig {
            enforce_unique_id: true,
            ..ChaincodeConfig::default()
        });
        registry
            .register(&args(&["u1", "Jane", "Doe", "pw", "first@x.com"]))
            .await
            .unwrap();

        let err = registry
            .register(&args(&["u1", "Jane", "Doe", "pw", "second@x.com"]))
            .await
            .unwrap_err();

        assert!(matches!(err, ChaincodeError::IdAlreadyExists { ref id } if id == "u1"));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_check_email() {
        let (store, registry) = service(ChaincodeConfig::default());

        let envelope = registry.check_email(&args(&["jane@x.com"])).await.unwrap();
        assert_eq!(envelope.message, "The email you have entered is a valid email.");
        assert!(matches!(envelope.data, ResponseData::Confirmation(_)));

        registry
            .register(&args(&["u1", "Jane", "Doe", "pw", "jane@x.com"]))
            .await
            .unwrap();
        let err = registry.check_email(&args(&["jane@x.com"])).await.unwrap_err();
        assert_eq!(err.to_string(), "The email you have entered already exist.");

        let before = store.operation_count();
        assert!(registry.check_email(&[]).await.is_err());
        assert_eq!(store.operation_count(), before);
    }

    #[tokio::test]
    async fn test_check_email_arity_is_not_a_register_status() {
        let (store, registry) = service(ChaincodeConfig::default());

        let probe_err = registry.check_email(&[]).await.unwrap_err();
        let register_err = registry.register(&[]).await.unwrap_err();

        assert_eq!(
            probe_err.to_string(),
            "Invalid number of arguments. Expected 1 argument."
        );
        assert_eq!(probe_err.status_code(), 500);
        assert_eq!(register_err.status_code(), 422);
        assert_ne!(probe_err.status_code(), register_err.status_code());
        assert!(!probe_err.is_fatal());
        assert_eq!(store.operation_count(), 0);

        let envelope = Envelope::from_error(&probe_err);
        assert_eq!(envelope.status, 500);
        assert_eq!(envelope.data, ResponseData::None);
    }
}
