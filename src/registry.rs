use tracing::{debug, info};

use crate::{
    account::{Account, RawValue},
    codec::{Codec, CodecError},
    command::{InitAccountCommand, InitCommand},
    processor::{LedgerError, Payload},
    store::StateStore,
};

/// Writes the two legacy entities, replacing whatever the keys held.
pub fn init(store: &mut dyn StateStore, cmd: &InitCommand) -> Result<Payload, LedgerError> {
    for (name, value) in &cmd.entities {
        store.put(name, RawValue(*value).encode()?)?;
        debug!(name = %name, value, "entity initialized");
    }
    Ok(None)
}

pub fn init_account(
    store: &mut dyn StateStore,
    cmd: &InitAccountCommand,
) -> Result<Payload, LedgerError> {
    // any stored value counts, whatever its shape
    if store.get(&cmd.name)?.is_some() {
        return Err(LedgerError::AlreadyExists {
            name: cmd.name.clone(),
        });
    }
    let account = Account::new(
        &cmd.name,
        &cmd.account_number,
        &cmd.phone_number,
        cmd.balance,
    );
    store_account(store, &account)?;
    info!(name = %account.name, balance = account.balance, "account created");
    Ok(None)
}

/// Returns the stored bytes untouched, after checking that they hold an
/// account.
pub fn read_account(store: &dyn StateStore, name: &str) -> Result<Vec<u8>, LedgerError> {
    let bytes = store.get(name)?.ok_or_else(|| LedgerError::NotFound {
        name: name.to_owned(),
    })?;
    decode_account(name, &bytes)?;
    Ok(bytes)
}

/// An account is only valid under the key matching its name, since it is
/// written back under that name.
fn decode_account(key: &str, bytes: &[u8]) -> Result<Account, CodecError> {
    let account = Account::decode(bytes)?;
    if account.name != key {
        return Err(CodecError::KeyMismatch {
            key: key.to_owned(),
            name: account.name,
        });
    }
    Ok(account)
}

pub fn load_account(store: &dyn StateStore, name: &str) -> Result<Account, LedgerError> {
    let bytes = store.get(name)?.ok_or_else(|| LedgerError::NotFound {
        name: name.to_owned(),
    })?;
    Ok(decode_account(name, &bytes)?)
}

pub fn store_account(store: &mut dyn StateStore, account: &Account) -> Result<(), LedgerError> {
    store.put(&account.name, account.encode()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        processor::ErrorKind,
        store::in_memory_store::{InMemoryStateStore, StoreCall},
    };

    use super::*;

    fn alice() -> InitAccountCommand {
        InitAccountCommand {
            name: "alice".into(),
            account_number: "001".into(),
            phone_number: "555-0100".into(),
            balance: 50,
        }
    }

    #[test]
    fn init_account_writes_empty_history() {
        let mut store = InMemoryStateStore::default();
        assert_eq!(init_account(&mut store, &alice()).unwrap(), None);

        let acc = load_account(&store, "alice").unwrap();
        assert_eq!(acc, Account::new("alice", "001", "555-0100", 50));
        assert!(acc.history.is_empty());
    }

    #[test]
    fn init_account_twice_keeps_original() {
        let mut store = InMemoryStateStore::default();
        init_account(&mut store, &alice()).unwrap();
        let before = store.state.get("alice").cloned();

        let err = init_account(
            &mut store,
            &InitAccountCommand {
                balance: 9000,
                ..alice()
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(err.to_string(), "This account already exists: alice");
        assert_eq!(store.state.get("alice").cloned(), before);
    }

    #[test]
    fn init_account_over_raw_entity() {
        let mut store = InMemoryStateStore::with_state([("alice", "10")]);
        let err = init_account(&mut store, &alice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(store.state.get("alice"), Some(&b"10".to_vec()));
    }

    #[test]
    fn init_account_store_failure() {
        let mut store = InMemoryStateStore::default().fail_get("alice");
        let err = init_account(&mut store, &alice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreError);
        assert_eq!(store.calls(), vec![StoreCall::Get("alice".into())]);
    }

    #[test]
    fn read_account_outcomes() {
        let mut store = InMemoryStateStore::with_state([("a", "10")]);
        init_account(&mut store, &alice()).unwrap();

        let bytes = read_account(&store, "alice").unwrap();
        assert_eq!(Some(&bytes), store.state.get("alice"));

        let err = read_account(&store, "nobody").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        // raw entity read as an account
        let err = read_account(&store, "a").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeError);

        let store = InMemoryStateStore::default().fail_get("alice");
        let err = read_account(&store, "alice").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreError);
    }

    #[test]
    fn account_under_foreign_key() {
        let robert = Account::new("robert", "003", "555", 0).encode().unwrap();
        let store = InMemoryStateStore::with_state([("bob", robert)]);

        let err = read_account(&store, "bob").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeError);
        assert_eq!(
            err.to_string(),
            "Account stored under `bob` is named `robert`"
        );
        let err = load_account(&store, "bob").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeError);
    }

    #[test]
    fn init_raw_entities() {
        let mut store = InMemoryStateStore::with_state([("a", "1")]);
        init(
            &mut store,
            &InitCommand {
                entities: [("a".into(), 100), ("b".into(), -7)],
            },
        )
        .unwrap();
        assert_eq!(store.state.get("a"), Some(&b"100".to_vec()));
        assert_eq!(store.state.get("b"), Some(&b"-7".to_vec()));
        assert_eq!(
            store.calls(),
            vec![StoreCall::Put("a".into()), StoreCall::Put("b".into())]
        );
    }
}
