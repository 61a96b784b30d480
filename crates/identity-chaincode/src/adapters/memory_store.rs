//! # In-Memory State Store
//!
//! `StateStore` over an ordered map, with a small rich-query engine that
//! matches `{"selector": {field: value}}` documents by top-level field
//! equality. Used by tests and local tooling; a peer deployment talks to the
//! ledger instead.

use crate::errors::StoreError;
use crate::ports::outbound::{KeyValue, StateQueryIterator, StateStore};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// In-memory ledger state.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    records: RwLock<BTreeMap<String, Vec<u8>>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    queries: AtomicUsize,
}

impl InMemoryStateStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record without touching the operation counters.
    pub fn insert_raw(&self, key: impl Into<String>, value: Vec<u8>) -> Result<(), StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(key.into(), value);
        Ok(())
    }

    /// Raw bytes under `key`, without touching the operation counters.
    pub fn raw(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .get(key)
            .cloned())
    }

    /// Number of stored records.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self
            .records
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .len())
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// `get_state` calls served.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// `put_state` calls served.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// `get_query_result` calls served.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Total store operations of any kind.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.read_count() + self.write_count() + self.query_count()
    }
}

fn parse_selector(query: &str) -> Result<Map<String, Value>, StoreError> {
    let document: Value =
        serde_json::from_str(query).map_err(|e| StoreError::InvalidQuery(e.to_string()))?;
    match document.get("selector") {
        Some(Value::Object(selector)) => Ok(selector.clone()),
        Some(_) => Err(StoreError::InvalidQuery(
            "selector must be an object".to_string(),
        )),
        None => Err(StoreError::InvalidQuery("missing selector".to_string())),
    }
}

// Records that are not JSON objects never match.
fn matches(selector: &Map<String, Value>, record: &[u8]) -> bool {
    let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(record) else {
        return false;
    };
    selector
        .iter()
        .all(|(field, expected)| fields.get(field) == Some(expected))
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.raw(key)
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.records
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn get_query_result(&self, query: &str) -> Result<StateQueryIterator, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let selector = parse_selector(query)?;
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;

        let hits: Vec<Result<KeyValue, StoreError>> = records
            .iter()
            .filter(|(_, value)| matches(&selector, value))
            .map(|(key, value)| {
                Ok(KeyValue {
                    key: key.clone(),
                    value: value.clone(),
                })
            })
            .collect();

        Ok(StateQueryIterator::new(hits))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(email: &str, status: u8) -> Vec<u8> {
        format!(r#"{{"email":"{email}","password":"pw","status":{status},"doc_type":"user"}}"#)
            .into_bytes()
    }

    #[tokio::test]
    async fn test_put_get_overwrite() {
        let store = InMemoryStateStore::new();
        assert_eq!(store.get_state("k").await.unwrap(), None);

        store.put_state("k", b"one".to_vec()).await.unwrap();
        store.put_state("k", b"two".to_vec()).await.unwrap();

        assert_eq!(store.get_state("k").await.unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.read_count(), 2);
    }

    #[tokio::test]
    async fn test_selector_equality_match() {
        let store = InMemoryStateStore::new();
        store.insert_raw("b", record("x@y.z", 1)).unwrap();
        store.insert_raw("a", record("x@y.z", 0)).unwrap();
        store.insert_raw("c", record("other@y.z", 1)).unwrap();

        let keys: Vec<String> = store
            .get_query_result(r#"{"selector":{"email":"x@y.z"}}"#)
            .await
            .unwrap()
            .map(|kv| kv.unwrap().key)
            .collect();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);

        let active: Vec<String> = store
            .get_query_result(r#"{"selector":{"email":"x@y.z","status":1}}"#)
            .await
            .unwrap()
            .map(|kv| kv.unwrap().key)
            .collect();
        assert_eq!(active, vec!["b".to_string()]);
        assert_eq!(store.query_count(), 2);
    }

    #[tokio::test]
    async fn test_non_json_records_never_match() {
        let store = InMemoryStateStore::new();
        store.insert_raw("blob", b"\x00\x01".to_vec()).unwrap();
        let mut results = store
            .get_query_result(r#"{"selector":{}}"#)
            .await
            .unwrap();
        assert!(results.next().is_none());
    }

    #[tokio::test]
    async fn test_invalid_queries() {
        let store = InMemoryStateStore::new();
        assert!(matches!(
            store.get_query_result("nope").await,
            Err(StoreError::InvalidQuery(_))
        ));
        assert!(matches!(
            store.get_query_result(r#"{"selector":[]}"#).await,
            Err(StoreError::InvalidQuery(_))
        ));
        assert!(matches!(
            store.get_query_result(r#"{"fields":["email"]}"#).await,
            Err(StoreError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_seeding_skips_counters() {
        let store = InMemoryStateStore::new();
        store.insert_raw("k", vec![1]).unwrap();
        assert_eq!(store.raw("k").unwrap(), Some(vec![1]));
        assert_eq!(store.operation_count(), 0);
        assert!(!store.is_empty().unwrap());
    }
}
