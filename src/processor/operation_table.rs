use std::collections::HashMap;

use tracing::{info, warn};

use crate::{
    command::{
        CommandError, InitAccountCommand, InitCommand, MoveCommand, NameCommand, Operation,
        TransferCommand,
    },
    query, registry,
    store::StateStore,
    transfer,
};

use super::{Handler, LedgerError, Payload};

fn handle_init(store: &mut dyn StateStore, args: &[String]) -> Result<Payload, LedgerError> {
    registry::init(store, &InitCommand::parse(args)?)
}

fn handle_init_account(store: &mut dyn StateStore, args: &[String]) -> Result<Payload, LedgerError> {
    registry::init_account(store, &InitAccountCommand::parse(args)?)
}

fn handle_read_account(store: &mut dyn StateStore, args: &[String]) -> Result<Payload, LedgerError> {
    let cmd = NameCommand::parse(Operation::ReadAccount, args)?;
    Ok(Some(registry::read_account(store, &cmd.name)?))
}

fn handle_move(store: &mut dyn StateStore, args: &[String]) -> Result<Payload, LedgerError> {
    transfer::move_value(store, &MoveCommand::parse(args)?)
}

fn handle_transfer(store: &mut dyn StateStore, args: &[String]) -> Result<Payload, LedgerError> {
    transfer::transfer(store, &TransferCommand::parse(args)?)
}

fn handle_delete(store: &mut dyn StateStore, args: &[String]) -> Result<Payload, LedgerError> {
    let cmd = NameCommand::parse(Operation::Delete, args)?;
    query::delete(store, &cmd.name)?;
    Ok(None)
}

fn handle_query(store: &mut dyn StateStore, args: &[String]) -> Result<Payload, LedgerError> {
    let cmd = NameCommand::parse(Operation::Query, args)?;
    Ok(Some(query::query(store, &cmd.name)?))
}

/// Routes an invocation to its handler by operation name.
///
/// Handlers share no state besides the store they are given, and validate
/// their argument count before touching it.
pub struct OperationTable {
    handlers: HashMap<Operation, Handler>,
}

impl Default for OperationTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.register(Operation::Init, handle_init);
        table.register(Operation::InitAccount, handle_init_account);
        table.register(Operation::ReadAccount, handle_read_account);
        table.register(Operation::Move, handle_move);
        table.register(Operation::Transfer, handle_transfer);
        table.register(Operation::Delete, handle_delete);
        table.register(Operation::Query, handle_query);
        table
    }
}

impl OperationTable {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Replaces the handler previously registered for `operation`, if any.
    pub fn register(&mut self, operation: Operation, handler: Handler) {
        self.handlers.insert(operation, handler);
    }

    pub fn invoke(
        &self,
        store: &mut dyn StateStore,
        operation: &str,
        args: &[String],
    ) -> Result<Payload, LedgerError> {
        info!(operation, args = args.len(), "invoke");
        let result = Operation::from_name(operation).and_then(|op| {
            self.handlers
                .get(&op)
                .ok_or_else(|| CommandError::UnknownOperation {
                    name: operation.to_owned(),
                })
        });
        let result = match result {
            Ok(handler) => handler(store, args),
            Err(err) => Err(err.into()),
        };
        if let Err(err) = &result {
            warn!(operation, kind = %err.kind(), "{err}");
        }
        result
    }
}
