use tracing::info;

use crate::{processor::LedgerError, store::StateStore};

/// Returns the stored bytes verbatim, whichever record shape they hold.
pub fn query(store: &dyn StateStore, name: &str) -> Result<Vec<u8>, LedgerError> {
    let value = store.get(name)?.ok_or_else(|| LedgerError::NotFound {
        name: name.to_owned(),
    })?;
    info!(name, value = %String::from_utf8_lossy(&value), "query response");
    Ok(value)
}

/// Removes the key. Deleting a key that was never written succeeds.
pub fn delete(store: &mut dyn StateStore, name: &str) -> Result<(), LedgerError> {
    store.delete(name)?;
    Ok(())
}
