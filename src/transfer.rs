//! Both operations read two parties, compute the new balances and write the
//! parties back one after the other: first the debited party, then the
//! credited one. The store only guarantees atomicity per key, so when the
//! second write fails the first one stays in place and the error of the
//! second write is returned. Nothing is rolled back.

use tracing::{debug, info};

use crate::{
    account::{AccountError, Balance, RawValue, TransactionKind},
    codec::Codec,
    command::{MoveCommand, Operation, TransferCommand, parse_integer},
    processor::{LedgerError, Payload},
    registry::{load_account, store_account},
    store::StateStore,
};

fn load_raw(store: &dyn StateStore, name: &str) -> Result<Balance, LedgerError> {
    let bytes = store.get(name)?.ok_or_else(|| LedgerError::NotFound {
        name: name.to_owned(),
    })?;
    Ok(RawValue::decode(&bytes)?.0)
}

/// Moves `amount` from one legacy entity to another.
///
/// There is no overdraft policy: the debited value may end up negative.
pub fn move_value(store: &mut dyn StateStore, cmd: &MoveCommand) -> Result<Payload, LedgerError> {
    let a_val = load_raw(store, &cmd.from)?;
    let b_val = load_raw(store, &cmd.to)?;
    let amount = parse_integer(Operation::Move, &cmd.amount)?;

    let overflow = |name: &str, kind| AccountError::BalanceOverflow {
        name: name.to_owned(),
        kind,
        amount,
    };
    let a_val = a_val
        .checked_sub(amount)
        .ok_or_else(|| overflow(&cmd.from, TransactionKind::Withdrawal))?;
    let b_val = b_val
        .checked_add(amount)
        .ok_or_else(|| overflow(&cmd.to, TransactionKind::Deposit))?;
    debug!(a_val, b_val, "computed new values");

    store.put(&cmd.from, RawValue(a_val).encode()?)?;
    store.put(&cmd.to, RawValue(b_val).encode()?)?;
    Ok(None)
}

/// Transfers `amount` between two accounts and records it in both histories.
///
/// The recipient's phone number is checked before anything is computed. On
/// success the payload is the encoded withdrawal appended to the sender.
pub fn transfer(store: &mut dyn StateStore, cmd: &TransferCommand) -> Result<Payload, LedgerError> {
    let mut sender = load_account(store, &cmd.sender)?;
    let mut recipient = load_account(store, &cmd.recipient)?;

    if cmd.recipient_phone_number != recipient.phone_number {
        return Err(LedgerError::PhoneNumberMismatch {
            name: recipient.name,
        });
    }

    let amount = parse_integer(Operation::Transfer, &cmd.amount)?;
    let withdrawal = sender.handle_transaction(TransactionKind::Withdrawal, amount, &cmd.message)?;
    let deposit = recipient.handle_transaction(TransactionKind::Deposit, amount, &cmd.message)?;
    let payload = withdrawal.encode()?;

    sender.apply(withdrawal);
    recipient.apply(deposit);
    debug!(
        sender_balance = sender.balance,
        recipient_balance = recipient.balance,
        "computed new balances"
    );

    store_account(store, &sender)?;
    store_account(store, &recipient)?;
    info!(sender = %sender.name, recipient = %recipient.name, amount, "transfer completed");
    Ok(Some(payload))
}
