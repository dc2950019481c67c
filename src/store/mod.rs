use thiserror::Error;

pub mod in_memory_store;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Failed to get state for {key}: {reason}")]
    Get { key: String, reason: String },
    #[error("Failed to put state for {key}: {reason}")]
    Put { key: String, reason: String },
    #[error("Failed to delete state for {key}: {reason}")]
    Delete { key: String, reason: String },
}

/// Key-value ledger the operations run against.
///
/// Every call is atomic for its own key only. There is no way to group
/// several writes, so a failure between two `put`s leaves the first one in
/// place.
pub trait StateStore {
    /// Returns `Ok(None)` when the key holds no value.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;
}
