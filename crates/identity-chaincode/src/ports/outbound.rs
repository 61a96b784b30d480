//! # Driven Ports (SPI - Outbound)
//!
//! The ledger state store the chaincode runs against. The peer implements
//! this for real transactions; [`crate::adapters::InMemoryStateStore`] backs
//! tests.
//!
//! ## Contract
//!
//! - `put_state` overwrites silently (last write wins for a key).
//! - `get_query_result` returns a finite, lazy sequence; it cannot be
//!   rewound, only re-issued.
//! - Every call fails fast with a `StoreError`; nothing here blocks forever.

use crate::errors::StoreError;
use async_trait::async_trait;

/// One query hit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    /// Store key the record lives under.
    pub key: String,
    /// Raw record bytes.
    pub value: Vec<u8>,
}

/// Lazy cursor over rich-query results.
pub struct StateQueryIterator {
    inner: Box<dyn Iterator<Item = Result<KeyValue, StoreError>> + Send>,
}

impl StateQueryIterator {
    /// Wrap any iterator of results.
    pub fn new<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<KeyValue, StoreError>>,
        I::IntoIter: Send + 'static,
    {
        Self {
            inner: Box::new(results.into_iter()),
        }
    }

    /// Cursor with no results.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }
}

impl Iterator for StateQueryIterator {
    type Item = Result<KeyValue, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl std::fmt::Debug for StateQueryIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateQueryIterator").finish_non_exhaustive()
    }
}

/// Key-value ledger state with a selector query capability.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Some(bytes)` - If a record exists
    /// * `None` - If the key was never written
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Run a `{"selector": {...}}` rich query.
    async fn get_query_result(&self, query: &str) -> Result<StateQueryIterator, StoreError>;
}
