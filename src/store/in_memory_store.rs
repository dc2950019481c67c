use std::{
    cell::RefCell,
    collections::{BTreeMap, HashSet},
};

use super::{StateStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Get(String),
    Put(String),
    Delete(String),
}

/// Store backed by a sorted map.
///
/// Every call is appended to a journal before it is served, including calls
/// that are configured to fail. The journal is unbounded and meant for tests;
/// long-running users turn it off with [`InMemoryStateStore::without_journal`].
/// Failures are injected per key and per kind of call, which is how split
/// writes are reproduced in tests.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    pub state: BTreeMap<String, Vec<u8>>,
    journal: RefCell<Vec<StoreCall>>,
    journal_disabled: bool,
    failing_gets: HashSet<String>,
    failing_puts: HashSet<String>,
    failing_deletes: HashSet<String>,
}

impl InMemoryStateStore {
    pub fn with_state<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        Self {
            state: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Default::default()
        }
    }

    /// Stops recording calls; [`InMemoryStateStore::calls`] stays empty.
    pub fn without_journal(mut self) -> Self {
        self.journal_disabled = true;
        self
    }

    pub fn fail_get(mut self, key: impl Into<String>) -> Self {
        self.failing_gets.insert(key.into());
        self
    }

    pub fn fail_put(mut self, key: impl Into<String>) -> Self {
        self.failing_puts.insert(key.into());
        self
    }

    pub fn fail_delete(mut self, key: impl Into<String>) -> Self {
        self.failing_deletes.insert(key.into());
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.journal.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.journal.borrow_mut().clear();
    }

    fn record(&self, call: StoreCall) {
        if self.journal_disabled {
            return;
        }
        self.journal.borrow_mut().push(call);
    }
}

impl StateStore for InMemoryStateStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.record(StoreCall::Get(key.to_owned()));
        if self.failing_gets.contains(key) {
            return Err(StoreError::Get {
                key: key.to_owned(),
                reason: "injected failure".to_owned(),
            });
        }
        Ok(self.state.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.record(StoreCall::Put(key.to_owned()));
        if self.failing_puts.contains(key) {
            return Err(StoreError::Put {
                key: key.to_owned(),
                reason: "injected failure".to_owned(),
            });
        }
        self.state.insert(key.to_owned(), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.record(StoreCall::Delete(key.to_owned()));
        if self.failing_deletes.contains(key) {
            return Err(StoreError::Delete {
                key: key.to_owned(),
                reason: "injected failure".to_owned(),
            });
        }
        self.state.remove(key);
        Ok(())
    }
}
